//! Interactive read-type-print loop.
//!
//! Each line runs through the full pipeline against a fresh context; the
//! interner persists across lines so repeated names stay cheap. No
//! history file and no completion.

use std::io;

use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

use crate::intern::Interner;
use crate::pipeline::{infer_source, Options};

pub struct Repl {
    interner: Interner,
    options: Options,
}

impl Repl {
    pub fn new(options: Options) -> Self {
        Repl {
            interner: Interner::new(),
            options,
        }
    }

    /// Run one line through the pipeline, returning the principal type of
    /// each top-level expression or a rendered diagnostic.
    pub fn execute(&mut self, line: &str) -> Result<Vec<String>, String> {
        infer_source(line, &mut self.interner, self.options)
    }

    /// Read lines until EOF. Ctrl-C clears the current line, Ctrl-D exits.
    pub fn run(&mut self) -> io::Result<()> {
        let mut editor = Reedline::create();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("skein".to_string()),
            DefaultPromptSegment::Empty,
        );

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match self.execute(&line) {
                        Ok(types) => {
                            for ty in types {
                                println!("- : {}", ty);
                            }
                        }
                        Err(rendered) => eprintln!("{}", rendered),
                    }
                }
                Signal::CtrlC => continue,
                Signal::CtrlD => return Ok(()),
            }
        }
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_types_a_line() {
        let mut repl = Repl::default();
        assert_eq!(repl.execute("fun (x) {x}").unwrap(), vec!["'a -> 'a"]);
    }

    #[test]
    fn interner_persists_across_lines() {
        let mut repl = Repl::default();
        repl.execute("let x = 1; x").unwrap();
        let before = repl.interner.len();
        repl.execute("let x = 2; x").unwrap();
        assert_eq!(repl.interner.len(), before);
    }

    #[test]
    fn errors_do_not_poison_the_repl() {
        let mut repl = Repl::default();
        assert!(repl.execute("ghost").is_err());
        assert_eq!(repl.execute("1").unwrap(), vec!["int"]);
    }
}
