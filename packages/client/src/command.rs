//! Line commands of the headless client.

use std::path::PathBuf;

use sketchboard_shared::domain::{BrushWidth, Color, DomainError, Point};
use thiserror::Error;

use crate::{sync::InputEvent, tool::Tool};

pub const HELP: &str = "\
Commands:
  down X Y     press the pointer at (X, Y)
  move X Y     drag the pointer to (X, Y)
  up           release the pointer
  undo | redo  step through your own history
  clear        clear your own view (not shared)
  brush        draw with the brush color
  eraser       draw with the background color
  color C      set the brush color (CSS color)
  width N      set the line width
  status       show session and canvas state
  save PATH    export the canvas as SVG
  help         show this help
  quit         leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Input(InputEvent),
    SelectTool(Tool),
    SetColor(Color),
    SetWidth(BrushWidth),
    Status,
    Save(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}' (type 'help' for the list)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    Invalid(#[from] DomainError),
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Err(CommandError::Usage("help"));
    };
    let args: Vec<&str> = words.collect();

    let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("down", [x, y]) => Command::Input(InputEvent::PointerDown(parse_point(x, y)?)),
        ("down", _) => return Err(CommandError::Usage("down X Y")),
        ("move", [x, y]) => Command::Input(InputEvent::PointerMove(parse_point(x, y)?)),
        ("move", _) => return Err(CommandError::Usage("move X Y")),
        ("up", []) => Command::Input(InputEvent::PointerUp),
        ("undo", []) => Command::Input(InputEvent::Undo),
        ("redo", []) => Command::Input(InputEvent::Redo),
        ("clear", []) => Command::Input(InputEvent::Clear),
        ("brush", []) => Command::SelectTool(Tool::Brush),
        ("eraser", []) => Command::SelectTool(Tool::Eraser),
        ("color", [color]) => Command::SetColor(Color::new(*color)?),
        ("color", _) => return Err(CommandError::Usage("color C")),
        ("width", [width]) => {
            let width = width
                .parse::<f64>()
                .map_err(|_| CommandError::Usage("width N"))?;
            Command::SetWidth(BrushWidth::new(width)?)
        }
        ("width", _) => return Err(CommandError::Usage("width N")),
        ("status", []) => Command::Status,
        ("save", [path]) => Command::Save(PathBuf::from(*path)),
        ("save", _) => return Err(CommandError::Usage("save PATH")),
        ("help", _) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (other, _) => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn parse_point(x: &str, y: &str) -> Result<Point, CommandError> {
    match (x.parse::<f64>(), y.parse::<f64>()) {
        (Ok(x), Ok(y)) => Ok(Point::try_new(x, y)?),
        _ => Err(CommandError::Usage("down|move X Y")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pointer_commands() {
        // テスト項目: ポインタ操作のコマンドが入力イベントに変換される
        // given (前提条件):
        let lines = ["down 10 10", "move 20.5 20", "up"];

        // when (操作):
        let commands: Vec<_> = lines.iter().map(|l| parse_command(l).unwrap()).collect();

        // then (期待する結果):
        assert_eq!(
            commands,
            vec![
                Command::Input(InputEvent::PointerDown(Point::new(10.0, 10.0))),
                Command::Input(InputEvent::PointerMove(Point::new(20.5, 20.0))),
                Command::Input(InputEvent::PointerUp),
            ]
        );
    }

    #[test]
    fn test_parse_tool_commands() {
        // テスト項目: ツール・色・太さ・保存のコマンドが解釈される
        // given (前提条件):

        // when (操作):
        let eraser = parse_command("eraser").unwrap();
        let color = parse_command("color #ff0000").unwrap();
        let width = parse_command("width 12").unwrap();
        let save = parse_command("save out.svg").unwrap();

        // then (期待する結果):
        assert_eq!(eraser, Command::SelectTool(Tool::Eraser));
        assert_eq!(color, Command::SetColor(Color::new("#ff0000").unwrap()));
        assert_eq!(width, Command::SetWidth(BrushWidth::new(12.0).unwrap()));
        assert_eq!(save, Command::Save(PathBuf::from("out.svg")));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        // テスト項目: 引数不足・不正な数値・未知のコマンドはエラーになる
        // given (前提条件):

        // when (操作):
        let missing = parse_command("down 1");
        let not_a_number = parse_command("move a b");
        let bad_width = parse_command("width 0");
        let unknown = parse_command("paint");

        // then (期待する結果):
        assert_eq!(missing, Err(CommandError::Usage("down X Y")));
        assert!(matches!(not_a_number, Err(CommandError::Usage(_))));
        assert_eq!(
            bad_width,
            Err(CommandError::Invalid(DomainError::InvalidWidth(0.0)))
        );
        assert_eq!(unknown, Err(CommandError::Unknown("paint".to_string())));
    }
}
