//! Executes parsed scripts against a session.

use std::collections::HashMap;

use super::ast::{Command, CommandKind, Script};
use crate::circuit::Point;
use crate::engine::{Session, Update};
use crate::error::{BoardError, Result};
use crate::report::BoardReport;

/// What a script run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunLog {
    /// Edits the board accepted
    pub applied: usize,
    /// Edits the board ignored (duplicate driver, bad terminal, wrong kind)
    pub ignored: usize,
    /// Board reports produced by `show`, in order
    pub reports: Vec<String>,
}

/// Runs script commands against a session, tracking script names.
///
/// Script errors (unknown or duplicate names, failed expectations) stop the
/// run. Edits the board itself rejects are not errors: they are counted in
/// [`RunLog::ignored`] and the run continues, as an interactive editor
/// would.
pub struct Runner<'s> {
    session: &'s mut Session,
    /// Script name -> generated id
    aliases: HashMap<String, String>,
}

impl<'s> Runner<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        Self {
            session,
            aliases: HashMap::new(),
        }
    }

    /// Script names currently bound, with their ids.
    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    /// Apply the script's settings, then execute every command in order.
    pub fn run(&mut self, script: &Script) -> Result<RunLog> {
        if let Some(rounds) = script.rounds {
            self.session.set_rounds(rounds);
        }
        if let Some(passes) = script.passes {
            self.session.set_max_passes(passes);
        }

        let mut log = RunLog::default();
        for command in &script.commands {
            self.execute(command, &mut log)?;
        }
        tracing::info!(
            applied = log.applied,
            ignored = log.ignored,
            "script finished"
        );
        Ok(log)
    }

    /// Execute a single command.
    pub fn execute(&mut self, command: &Command, log: &mut RunLog) -> Result<()> {
        let line = command.line;
        tracing::debug!(line, command = command.kind.keyword(), "executing");

        let update = match &command.kind {
            CommandKind::Source { name } => {
                self.check_fresh(name, line)?;
                let id = self.session.add_input_source();
                self.aliases.insert(name.clone(), id.0);
                log.applied += 1;
                return Ok(());
            }
            CommandKind::Gate { name, gate_type } => {
                self.check_fresh(name, line)?;
                let id = self.session.add_gate(*gate_type);
                self.aliases.insert(name.clone(), id.0);
                log.applied += 1;
                return Ok(());
            }
            CommandKind::Toggle { name } => {
                let id = self.id_of(name, line)?;
                self.session.toggle_input_source(&id)
            }
            CommandKind::Connect { from, gate, terminal } => {
                let from = self.id_of(from, line)?;
                let gate = self.id_of(gate, line)?;
                self.session.create_connection(&from, &gate, *terminal)
            }
            CommandKind::Disconnect { gate, terminal } => {
                let gate = self.id_of(gate, line)?;
                let wire = self
                    .session
                    .circuit()
                    .connection_at(&gate, *terminal)
                    .map(|c| c.id.clone());
                match wire {
                    Some(wire) => self.session.delete_connection(wire.as_str()),
                    None => Update::default(),
                }
            }
            CommandKind::Move { name, x, y } => {
                let id = self.id_of(name, line)?;
                self.session.update_component_position(&id, Point::new(*x, *y))
            }
            CommandKind::Delete { name } => {
                let id = self.id_of(name, line)?;
                self.aliases.remove(name);
                self.session.delete_component(&id)
            }
            CommandKind::Expect { name, value } => {
                let id = self.id_of(name, line)?;
                let actual = self
                    .session
                    .output_of(&id)
                    .ok_or_else(|| BoardError::UnknownAlias {
                        name: name.clone(),
                        line,
                    })?;
                if actual != *value {
                    return Err(BoardError::ExpectationFailed {
                        name: name.clone(),
                        line,
                        expected: *value,
                        actual,
                    });
                }
                return Ok(());
            }
            CommandKind::Show => {
                let report = BoardReport::new(&*self.session)
                    .with_aliases(&self.aliases)
                    .to_string();
                tracing::info!(line, "board snapshot taken");
                log.reports.push(report);
                return Ok(());
            }
        };

        if update.applied {
            log.applied += 1;
        } else {
            log.ignored += 1;
            tracing::warn!(
                line,
                command = command.kind.keyword(),
                "edit ignored by the board"
            );
        }
        if !update.changed.is_empty() {
            tracing::debug!(line, changed = update.changed.len(), "logic changed");
        }
        Ok(())
    }

    fn check_fresh(&self, name: &str, line: usize) -> Result<()> {
        if self.aliases.contains_key(name) {
            return Err(BoardError::DuplicateAlias {
                name: name.to_string(),
                line,
            });
        }
        Ok(())
    }

    fn id_of(&self, name: &str, line: usize) -> Result<String> {
        self.aliases
            .get(name)
            .cloned()
            .ok_or_else(|| BoardError::UnknownAlias {
                name: name.to_string(),
                line,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse;

    fn run(input: &str) -> (Session, Result<RunLog>) {
        let mut session = Session::new();
        let script = parse(input).unwrap();
        let result = Runner::new(&mut session).run(&script);
        (session, result)
    }

    #[test]
    fn test_half_adder() {
        let input = "\
source a
source b
gate sum XOR
gate carry AND
connect a sum 0
connect b sum 1
connect a carry 0
connect b carry 1
expect sum 0
expect carry 0
toggle a
expect sum 1
expect carry 0
toggle b
expect sum 0
expect carry 1
";
        let (session, result) = run(input);
        let log = result.unwrap();
        assert_eq!(log.applied, 10);
        assert_eq!(log.ignored, 0);
        assert_eq!(session.circuit().connections().len(), 4);
    }

    #[test]
    fn test_and_scenario_script() {
        let input = "\
source s
gate g AND
connect s g 0
expect g 0
toggle s
expect g 0
connect s g 1
expect g 1
";
        let (_, result) = run(input);
        assert!(result.is_ok());
    }

    #[test]
    fn test_ignored_edits_are_counted() {
        let input = "\
source a
gate n NOT
connect a n 0
connect a n 0
connect a n 1
toggle n
disconnect n 0
disconnect n 0
";
        let (session, result) = run(input);
        let log = result.unwrap();
        assert_eq!(log.applied, 4);
        assert_eq!(log.ignored, 4);
        assert!(session.circuit().connections().is_empty());
    }

    #[test]
    fn test_script_errors() {
        let (_, result) = run("source a\nsource a");
        assert!(matches!(result, Err(BoardError::DuplicateAlias { line: 2, .. })));

        let (_, result) = run("toggle ghost");
        assert!(matches!(result, Err(BoardError::UnknownAlias { line: 1, .. })));

        let (_, result) = run("gate n NOT\nexpect n 0");
        assert!(matches!(
            result,
            Err(BoardError::ExpectationFailed {
                line: 2,
                expected: false,
                actual: true,
                ..
            })
        ));

        let (_, result) = run("source a\ndelete a\ntoggle a");
        assert!(matches!(result, Err(BoardError::UnknownAlias { line: 3, .. })));
    }

    #[test]
    fn test_delete_frees_name() {
        let (session, result) = run("gate g OR\ndelete g\ngate g NAND\nshow");
        let log = result.unwrap();
        assert_eq!(session.circuit().gates().len(), 1);
        assert_eq!(log.reports.len(), 1);
        assert!(log.reports[0].contains("NAND"));
    }

    #[test]
    fn test_directives_configure_session() {
        let (session, result) = run(".rounds 1\n.passes 3\nsource a");
        assert!(result.is_ok());
        assert_eq!(session.config().rounds, 1);
        assert_eq!(session.config().max_passes, 3);
    }

    #[test]
    fn test_move_and_show() {
        let (session, result) = run("source a\nmove a 5 -5\nshow");
        let log = result.unwrap();
        assert_eq!(session.circuit().sources()[0].position, Point::new(5.0, -5.0));
        assert!(log.reports[0].contains("  a = 0"));
    }
}
