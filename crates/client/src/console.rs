use thiserror::Error;

use catalogo_core::form::{CreateField, UpdateField};
use catalogo_core::ui::{Action, View};

/// Parsed console input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Action),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("comando desconocido: {0}")]
    UnknownCommand(String),
    #[error("campo desconocido: {0}")]
    UnknownField(String),
    #[error("uso: {0}")]
    Usage(&'static str),
    #[error("no hay formulario en esta vista")]
    NoForm,
}

/// Maps one input line to an action for the current view.
///
/// `set` and `enviar` act on whichever form the view shows.
pub fn parse_command(line: &str, view: View) -> Result<Command, ConsoleError> {
    let line = line.trim();
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    if let Some(target) = View::ALL.into_iter().find(|v| v.as_str() == keyword) {
        let action = match target {
            View::Home => Action::ReturnHome,
            other => Action::Navigate(other),
        };
        return Ok(Command::Dispatch(action));
    }

    let action = match keyword {
        "salir" => return Ok(Command::Quit),
        "volver" => Action::ReturnHome,
        "codigo" => Action::SetSearchCode(rest.to_string()),
        "set" => parse_set(rest, view)?,
        "enviar" => match view {
            View::Search => Action::SubmitSearch,
            View::Create => Action::SubmitCreate,
            View::Update => Action::SubmitUpdate,
            View::Home | View::List => return Err(ConsoleError::NoForm),
        },
        other => return Err(ConsoleError::UnknownCommand(other.to_string())),
    };
    Ok(Command::Dispatch(action))
}

fn parse_set(rest: &str, view: View) -> Result<Action, ConsoleError> {
    let (name, value) = match rest.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim().to_string()),
        None if !rest.is_empty() => (rest, String::new()),
        None => return Err(ConsoleError::Usage("set <campo> <valor>")),
    };

    match view {
        View::Create => CreateField::parse(name)
            .map(|field| Action::SetCreateField(field, value))
            .ok_or_else(|| ConsoleError::UnknownField(name.to_string())),
        View::Update => UpdateField::parse(name)
            .map(|field| Action::SetUpdateField(field, value))
            .ok_or_else(|| ConsoleError::UnknownField(name.to_string())),
        _ => Err(ConsoleError::NoForm),
    }
}
