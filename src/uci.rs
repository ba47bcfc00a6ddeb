use crate::board::Board;
use crate::move_generator::{attackers_of, generate, GenType};
use crate::search::{Search, DEFAULT_DEPTH};
use crate::square::square_representation;

use regex::Regex;
use rustyline::config::Configurer;
use rustyline::Editor;

/// The UCI-subset adapter: owns one engine instance (board + search) and
/// translates text commands into engine calls. Each handled command yields
/// the full batch of reply lines for that one request
pub struct UCI {
    board: Board,
    search: Search,
    editor: Editor<()>,
}

impl Default for UCI {
    fn default() -> Self {
        let mut editor = Editor::<()>::new();
        editor.set_auto_add_history(true);
        editor.set_check_cursor_position(true);
        UCI {
            board: Board::new(),
            search: Search::new(),
            editor,
        }
    }
}

impl UCI {
    pub fn run(&mut self) {
        while let Ok(line) = self.editor.readline("") {
            match self.handle_command(&line) {
                Ok(UCIOkCode::ShouldQuit) => break,
                Ok(UCIOkCode::Replies(replies)) => {
                    for reply in replies {
                        println!("{}", reply)
                    }
                }
                Err(UCIErrCode::NoCommand) => (),
                Err(UCIErrCode::BadCommand(cmd)) => {
                    eprintln!("Unknown or badly formed UCI command: {}", cmd)
                }
                Err(UCIErrCode::BadMove(mv)) => {
                    eprintln!("Badly formatted or illegal move: {}", mv)
                }
                Err(UCIErrCode::BadFen(fen)) => eprintln!("Unreadable FEN: {}", fen),
                Err(UCIErrCode::MissingArg(arg)) => {
                    eprintln!("Missing an argument: {} {} <- here", line.trim(), arg)
                }
            }
        }
    }

    pub fn handle_command(&mut self, line: &str) -> Result<UCIOkCode, UCIErrCode> {
        let args_regex = Self::args_regex();
        let mut args = args_regex.find_iter(line).map(|m| m.as_str());
        let cmd = match args.next() {
            Some(c) => c,
            None => return Err(UCIErrCode::NoCommand),
        };
        let mut replies: Vec<String> = vec![];
        match cmd {
            "uci" => {
                replies.push(String::from("id name Minnow"));
                replies.push(format!("id author {}", env!("CARGO_PKG_AUTHORS")));
                replies.push(String::from(
                    "option name Skill Level type spin default 20 min 0 max 20",
                ));
                replies.push(String::from("uciok"));
            }
            "isready" => replies.push(String::from("readyok")),
            "setoption" => {
                // The only supported option; other names are silently ignored,
                // and an unparseable value leaves the current setting in place
                if let Some(captures) = Self::skill_option_regex().captures(line) {
                    if let Ok(skill) = captures[1].parse::<i32>() {
                        self.search.set_skill_level(skill.clamp(0, 20) as u8);
                    }
                }
            }
            "ucinewgame" => self.board = Board::new(),
            "position" => {
                let rest: Vec<&str> = args.collect();
                let moves_at = rest.iter().position(|w| *w == "moves");
                match rest.first() {
                    Some(&"startpos") => self.board = Board::new(),
                    Some(&"fen") => {
                        let fen = rest[1..moves_at.unwrap_or(rest.len())].join(" ");
                        self.board = Board::from_fen(&fen)
                            .map_err(|_| UCIErrCode::BadFen(fen.clone()))?;
                    }
                    _ => return Err(UCIErrCode::MissingArg(String::from("<startpos | fen>"))),
                }
                if let Some(at) = moves_at {
                    for mv in &rest[at + 1..] {
                        self.board
                            .make_from_str(mv)
                            .map_err(|_| UCIErrCode::BadMove(String::from(*mv)))?;
                    }
                }
            }
            "go" => {
                let mut depth = DEFAULT_DEPTH;
                let go_args: Vec<&str> = args.collect();
                if let Some(at) = go_args.iter().position(|w| *w == "depth") {
                    depth = go_args
                        .get(at + 1)
                        .and_then(|d| d.parse::<i8>().ok())
                        .ok_or_else(|| UCIErrCode::MissingArg(String::from("<depth>")))?;
                }
                replies.push(match self.search.best_move(&mut self.board, depth) {
                    Some(mv) => format!("bestmove {}", mv),
                    None => String::from("bestmove (none)"),
                });
            }
            // The search always runs to completion, there is nothing to stop
            "stop" => (),
            "d" => {
                replies.push(format!("Fen: {}", self.board.fen()));
                replies.push(format!("Checkers: {}", self.checkers()));
                replies.push(format!(
                    "Legal moves: {}",
                    generate(&mut self.board, GenType::Legal)
                ));
            }
            "quit" => return Ok(UCIOkCode::ShouldQuit),
            _ => return Err(UCIErrCode::BadCommand(String::from(cmd))),
        }

        Ok(UCIOkCode::Replies(replies))
    }

    /// Squares of every opposing piece giving check to the side to move
    fn checkers(&self) -> String {
        let side = self.board.side_to_move();
        let king_sq = match self.board.king_square(side) {
            Some(sq) => sq,
            None => return String::from("-"),
        };
        let attackers = attackers_of(&self.board, king_sq, side.opposite());
        if attackers.is_empty() {
            return String::from("-");
        }
        attackers
            .iter()
            .filter_map(|&sq| square_representation(sq))
            .collect::<Vec<String>>()
            .join(" ")
    }

    fn args_regex() -> Regex {
        Regex::new(r#"(".*?"|[^"\s]+)"#).unwrap()
    }

    fn skill_option_regex() -> Regex {
        Regex::new(r"^\s*setoption\s+name\s+Skill\s+Level\s+value\s+(-?\d+)\s*$").unwrap()
    }
}

pub enum UCIOkCode {
    Replies(Vec<String>),
    ShouldQuit,
}

#[derive(Debug)]
pub enum UCIErrCode {
    MissingArg(String),
    NoCommand,
    BadCommand(String),
    BadMove(String),
    BadFen(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::START_FEN;

    fn replies(uci: &mut UCI, line: &str) -> Vec<String> {
        match uci.handle_command(line) {
            Ok(UCIOkCode::Replies(replies)) => replies,
            other => panic!("expected replies for {:?}, got {:?}", line, other.is_ok()),
        }
    }

    #[test]
    fn identification_handshake() {
        let mut uci = UCI::default();
        let lines = replies(&mut uci, "uci");
        assert_eq!(lines.first().map(String::as_str), Some("id name Minnow"));
        assert_eq!(lines.last().map(String::as_str), Some("uciok"));
        assert_eq!(replies(&mut uci, "isready"), vec!["readyok"]);
    }

    #[test]
    fn skill_option_is_regex_parsed_and_clamped() {
        let mut uci = UCI::default();
        replies(&mut uci, "setoption name Skill Level value 5");
        assert_eq!(uci.search.max_depth(), 2);
        replies(&mut uci, "setoption name Skill Level value 99");
        assert_eq!(uci.search.max_depth(), 6);
        // Unknown options are ignored without complaint
        replies(&mut uci, "setoption name Hash value 128");
        assert_eq!(uci.search.max_depth(), 6);
    }

    #[test]
    fn unparseable_skill_value_keeps_the_current_setting() {
        let mut uci = UCI::default();
        replies(&mut uci, "setoption name Skill Level value 5");
        assert_eq!(uci.search.max_depth(), 2);
        replies(
            &mut uci,
            "setoption name Skill Level value 99999999999999999999",
        );
        assert_eq!(uci.search.max_depth(), 2);
    }

    #[test]
    fn position_startpos_with_moves() {
        let mut uci = UCI::default();
        replies(&mut uci, "position startpos moves e2e4 e7e5");
        assert_eq!(
            uci.board.fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
        );
    }

    #[test]
    fn position_fen_with_moves() {
        let mut uci = UCI::default();
        replies(
            &mut uci,
            "position fen 7k/5Q2/6K1/8/8/8/8/8 w - - 0 1 moves f7g7",
        );
        assert_eq!(uci.board.fen(), "7k/6Q1/6K1/8/8/8/8/8 b - - 1 1");
    }

    #[test]
    fn illegal_replay_aborts_the_command() {
        let mut uci = UCI::default();
        let result = uci.handle_command("position startpos moves e2e4 e2e4");
        assert!(matches!(result, Err(UCIErrCode::BadMove(_))));
    }

    #[test]
    fn bad_fen_is_reported() {
        let mut uci = UCI::default();
        let result = uci.handle_command("position fen not/even/close w");
        assert!(matches!(result, Err(UCIErrCode::BadFen(_))));
    }

    #[test]
    fn go_replies_with_a_legal_bestmove() {
        let mut uci = UCI::default();
        let lines = replies(&mut uci, "go depth 2");
        assert_eq!(lines.len(), 1);
        let mv = lines[0].strip_prefix("bestmove ").unwrap();
        let legal = generate(&mut uci.board, GenType::Legal);
        assert!(legal.iter().any(|m| m.to_string() == mv));
    }

    #[test]
    fn go_on_a_dead_position_replies_none() {
        let mut uci = UCI::default();
        replies(&mut uci, "position fen 7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(replies(&mut uci, "go"), vec!["bestmove (none)"]);
    }

    #[test]
    fn d_prints_fen_checkers_and_legal_moves() {
        let mut uci = UCI::default();
        let lines = replies(&mut uci, "d");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("Fen: {}", START_FEN));
        assert_eq!(lines[1], "Checkers: -");
        assert!(lines[2].starts_with("Legal moves: "));
        assert_eq!(lines[2].split_whitespace().count(), 2 + 20);
    }

    #[test]
    fn d_reports_checkers_when_in_check() {
        let mut uci = UCI::default();
        replies(&mut uci, "position startpos moves f2f3 e7e5 g2g4 d8h4");
        let lines = replies(&mut uci, "d");
        assert_eq!(lines[1], "Checkers: h4");
        assert_eq!(lines[2], "Legal moves: ");
    }

    #[test]
    fn stop_is_accepted_and_does_nothing() {
        let mut uci = UCI::default();
        assert!(replies(&mut uci, "stop").is_empty());
    }

    #[test]
    fn ucinewgame_resets_the_board() {
        let mut uci = UCI::default();
        replies(&mut uci, "position startpos moves e2e4");
        replies(&mut uci, "ucinewgame");
        assert_eq!(uci.board.fen(), START_FEN);
    }

    #[test]
    fn unknown_commands_are_rejected() {
        let mut uci = UCI::default();
        assert!(matches!(
            uci.handle_command("warble"),
            Err(UCIErrCode::BadCommand(_))
        ));
        assert!(matches!(
            uci.handle_command("   "),
            Err(UCIErrCode::NoCommand)
        ));
    }

    #[test]
    fn quit_terminates_the_session() {
        let mut uci = UCI::default();
        assert!(matches!(
            uci.handle_command("quit"),
            Ok(UCIOkCode::ShouldQuit)
        ));
    }
}
