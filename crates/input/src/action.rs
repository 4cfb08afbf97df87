use std::str::FromStr;

use glam::Vec3;
use mazerun_common::CellCoord;

/// A high-level action produced by any front end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// The player's body moved to this world position.
    MoveTo(Vec3),
    /// Click at local minimap pixel coordinates.
    ClickMinimap { x: f32, y: f32 },
    /// Show the path to this cell.
    SetDestination(CellCoord),
    /// Finish this maze and move on to a bigger one.
    Reset,
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseActionError {
    #[error("empty action")]
    Empty,
    #[error("unknown action `{0}`")]
    Unknown(String),
    #[error("`{action}` expects {expected} arguments, got {got}")]
    Arity {
        action: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("invalid number `{0}`")]
    Number(String),
}

/// Text form, one action per line: `move X Y Z`, `click PX PY`,
/// `goto X Y`, `reset`, `noop`.
impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(ParseActionError::Empty)?;
        let args: Vec<&str> = words.collect();
        match verb.to_ascii_lowercase().as_str() {
            "move" => {
                let [x, y, z] = floats::<3>("move", &args)?;
                Ok(Action::MoveTo(Vec3::new(x, y, z)))
            }
            "click" => {
                let [x, y] = floats::<2>("click", &args)?;
                Ok(Action::ClickMinimap { x, y })
            }
            "goto" => {
                let [x, y] = arity::<2>("goto", &args)?;
                Ok(Action::SetDestination(CellCoord::new(
                    parse(x)?,
                    parse(y)?,
                )))
            }
            "reset" => arity::<0>("reset", &args).map(|_| Action::Reset),
            "noop" => arity::<0>("noop", &args).map(|_| Action::Noop),
            _ => Err(ParseActionError::Unknown(verb.to_string())),
        }
    }
}

fn arity<'a, const N: usize>(
    action: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], ParseActionError> {
    <[&str; N]>::try_from(args).map_err(|_| ParseActionError::Arity {
        action,
        expected: N,
        got: args.len(),
    })
}

fn floats<const N: usize>(action: &'static str, args: &[&str]) -> Result<[f32; N], ParseActionError> {
    let words = arity::<N>(action, args)?;
    let mut out = [0.0; N];
    for (slot, word) in out.iter_mut().zip(words) {
        *slot = parse(word)?;
    }
    Ok(out)
}

fn parse<T: FromStr>(word: &str) -> Result<T, ParseActionError> {
    word.parse()
        .map_err(|_| ParseActionError::Number(word.to_string()))
}
