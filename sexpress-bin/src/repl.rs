#![cfg(feature = "repl")]

use std::sync::Arc;

use rustyline::{self, error::ReadlineError, Config, CompletionType, EditMode, hint::HistoryHinter, validate::MatchingBracketValidator, Editor};
use sexpress::session::SessionManager;

use crate::helper::ReplHelper;

const C_RESET: &str = "\x1b[0m";
const C_BLUE: &str = "\x1b[94m";
const C_RED: &str = "\x1b[91m";
const PROMPT: &str = "\x1b[94m>> \x1b[0m";

pub fn repl() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let manager = Arc::new(SessionManager::new());
    let session = manager.create_session()?;

    let h = ReplHelper {
        hinter: HistoryHinter {},
        colored_prompt: PROMPT.to_owned(),
        validator: MatchingBracketValidator::new(),
        manager: manager.clone(),
        session,
    };

    let histfile = std::env::var("SEXPRESS_HISTORY").ok();

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(h));
    if let Some(hf) = &histfile {
        // absent on first run
        let _ = rl.load_history(hf);
    }

    println!("Press {}Ctrl+D{} to exit.", C_BLUE, C_RESET);

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue
                }
                rl.add_history_entry(&line);
                match manager.evaluate(session, &line) {
                    Ok(value) => println!("{}", value),
                    Err(e) => eprintln!("{}Error: {}{}", C_RED, C_RESET, e)
                }
            }
            Err(ReadlineError::Eof) => break,
            Err(_) => (),
        }
    }

    if let Some(hf) = &histfile {
        rl.save_history(hf)?
    }
    manager.end_session(session);
    Ok(())
}
