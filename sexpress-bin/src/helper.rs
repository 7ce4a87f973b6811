#![cfg(feature = "repl")]

use std::{borrow::Cow, sync::Arc};

use rustyline::completion::Completer;
use rustyline::highlight::Highlighter;
use rustyline::hint::HistoryHinter;
use rustyline::validate::MatchingBracketValidator;
use rustyline_derive::{Helper, Hinter, Validator};
use sexpress::session::{SessionId, SessionManager};

#[derive(Helper, Hinter, Validator)]
pub struct ReplHelper {
    #[rustyline(Validator)]
    pub validator: MatchingBracketValidator,
    #[rustyline(Hinter)]
    pub hinter: HistoryHinter,
    pub colored_prompt: String,
    pub manager: Arc<SessionManager>,
    pub session: SessionId,
}

fn find_paired_paren(line: &str, pos: usize) -> Result<usize, bool> {
    if pos >= line.len() {
        return Err(false)
    }
    let c = line.as_bytes()[pos];
    let (target, fwd) = match c {
        b'(' => (b')', true),
        b')' => (b'(', false),
        _ => return Err(false),
    };
    let mut depth = 0;
    let mut idx = 0;
    if fwd {
        let bytes = &line.as_bytes()[pos+1..];
        for &b in bytes {
            if b == c {
                depth += 1;
            } else if b == target {
                if depth == 0 {
                    return Ok(pos + idx + 1)
                } else {
                    depth -= 1;
                }
            }
            idx += 1;
        }
    } else {
        let bytes = &line.as_bytes()[..pos];
        for &b in bytes.iter().rev() {
            if b == c {
                depth += 1;
            } else if b == target {
                if depth == 0 {
                    return Ok(pos - idx - 1)
                } else {
                    depth -= 1;
                }
            }
            idx += 1;
        }
    }
    Err(true)
}

impl Highlighter for ReplHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Borrowed(&self.colored_prompt)
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        match find_paired_paren(line, pos) {
            Err(false) => Cow::Borrowed(line),
            Err(true) => {
                let mut line = line.to_owned();
                line.replace_range(pos..=pos, &format!("\x1b[91m{}\x1b[0m", line.as_bytes()[pos] as char));
                Cow::Owned(line)
            },
            Ok(match_pos) => {
                let fst = pos.min(match_pos);
                let snd = pos.max(match_pos);
                let mut line = line.to_owned();
                line.replace_range(snd..=snd, &format!("\x1b[92m{}\x1b[0m", line.as_bytes()[snd] as char));
                line.replace_range(fst..=fst, &format!("\x1b[92m{}\x1b[0m", line.as_bytes()[fst] as char));
                Cow::Owned(line)
            },
        }
    }

    fn highlight_char(&self, line: &str, _: usize) -> bool {
        !line.is_empty()
    }
}

impl Completer for ReplHelper {
    fn complete(&self, line: &str, pos: usize, _: &rustyline::Context<'_>)
    -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let mut res = String::new();
        for ch in line[..pos].chars().rev() {
            match ch {
                '(' | ')' | ';' => break,
                c if c.is_whitespace() => break,
                c => res.push(c),
            }
        }
        let res: String = res.chars().rev().collect();
        let mut keys = match self.manager.list_variables(self.session) {
            Ok(vars) => vars.keys()
                .filter(|x| x.starts_with(&res))
                .map(|s| s.to_string())
                .collect::<Vec<String>>(),
            Err(_) => vec![],
        };
        keys.sort();
        Ok((pos - res.len(), keys))
    }

    fn update(&self, line: &mut rustyline::line_buffer::LineBuffer, start: usize, elected: &str) {
        let end = line.pos();
        line.replace(start..end, elected);
    }

    type Candidate = String;
}
