//! Prompt-driven acquisition of an automaton: Σ, S, δ and s₀, one step at a time.
//!
//! Every answer goes through a pure parser first. A rejected answer prints the reason and asks again,
//! the exit command at any prompt ends the whole program.

use std::io::{BufRead, Write};

use fsa::session::{is_exit, read_line};
use fsa::{AutomatonBuilder, Dfa, StateId};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::error::{InputError, ShellError};

/// Parsed alphabet symbols, in the order typed. May contain repeats.
pub type Symbols = SmallVec<[char; 8]>;

/// Parsed transitions of one state.
pub type Links = SmallVec<[(char, StateId); 4]>;

const TRANSITION_FORMAT: &str = "Please, enter the transitions in the form of \"symbol,next_state_number;\".\n\
     Note: whitespace characters are valid alphabetical symbols!\n\
     Leave empty if there are no transitions:";

// MARK: Parsers

/// Splits on `separator`, dropping trailing empty pieces only.
fn split_fields(line: &str, separator: char) -> SmallVec<[&str; 8]> {
    let mut fields: SmallVec<[&str; 8]> = line.split(separator).collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

fn single_char(field: &str) -> Option<char> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Comma separated single characters. Nothing is trimmed, a space is a symbol like any other.
pub fn parse_alphabet(line: &str) -> Result<Symbols, InputError> {
    if line.is_empty() {
        return Err(InputError::Empty);
    }
    let fields = split_fields(line, ',');
    if fields.is_empty() {
        return Err(InputError::NoSymbols);
    }
    fields
        .iter()
        .map(|field| single_char(field).ok_or_else(|| InputError::NotASymbol(field.to_string())))
        .collect()
}

fn parse_positive(field: &str) -> Result<usize, InputError> {
    match field.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(InputError::NotAPositiveNumber(field.to_string())),
    }
}

/// |S|, a positive integer.
pub fn parse_state_count(line: &str) -> Result<usize, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InputError::Empty);
    }
    parse_positive(line)
}

/// `y` or `n`, any case.
pub fn parse_accepting(line: &str) -> Result<bool, InputError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => Err(InputError::Empty),
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err(InputError::NotYesNo),
    }
}

fn parse_state_number(field: &str, count: usize) -> Result<StateId, InputError> {
    let number = parse_positive(field.trim())?;
    if number > count {
        return Err(InputError::StateOutOfRange { number, count });
    }
    StateId::from_number(number).ok_or_else(|| InputError::NotAPositiveNumber(field.to_string()))
}

/// `symbol,state;symbol,state;...` with 1-based states. An empty line is a state with no way out.
/// A symbol given twice keeps its last target.
pub fn parse_transitions(line: &str, alphabet: &[char], count: usize) -> Result<Links, InputError> {
    let mut links = Links::new();
    if line.is_empty() {
        return Ok(links);
    }

    for link in split_fields(line, ';') {
        let mut fields = link.split(',');
        let (Some(symbol), Some(target), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(InputError::MalformedTransition(link.to_string()));
        };
        let symbol = single_char(symbol).ok_or_else(|| InputError::NotASymbol(symbol.to_string()))?;
        if !alphabet.contains(&symbol) {
            return Err(InputError::UnknownSymbol(symbol));
        }
        links.push((symbol, parse_state_number(target, count)?));
    }

    Ok(links)
}

/// s₀, a 1-based state number.
pub fn parse_start(line: &str, count: usize) -> Result<StateId, InputError> {
    if line.trim().is_empty() {
        return Err(InputError::Empty);
    }
    parse_state_number(line, count)
}

// MARK: Acquisition

/// The interactive builder. Owns the line source and the prompt sink for the whole session.
pub struct Acquisition<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Acquisition<R, W> {
    /// Wraps an input and an output stream.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Hands the streams back, so the word-testing loop can continue on the same input.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    fn prompt_line(&mut self, prompt: &str) -> Result<String, ShellError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let line = read_line(&mut self.input)?.ok_or(ShellError::EndOfInput)?;
        if is_exit(&line) {
            info!("exit requested during acquisition");
            return Err(ShellError::Exit);
        }
        Ok(line)
    }

    /// Asks until `parse` accepts the answer.
    fn ask<T>(
        &mut self,
        prompt: &str,
        hint: Option<&str>,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> Result<T, ShellError> {
        loop {
            let line = self.prompt_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(InputError::Empty) => continue,
                Err(err) => {
                    warn!(%err, "input rejected");
                    writeln!(self.output, "{err}")?;
                    if let Some(hint) = hint {
                        writeln!(self.output, "{hint}")?;
                    }
                }
            }
        }
    }

    /// Step 1: Σ.
    pub fn alphabet(&mut self) -> Result<Symbols, ShellError> {
        writeln!(self.output, "\nStep 1: Define the alphabet \u{03A3}")?;
        writeln!(
            self.output,
            "Please, enter the symbols of the alphabet, separated by commas:\n\
             Note: whitespace characters are considered as valid symbols!"
        )?;
        let symbols = self.ask("\t\u{03A3} = ", None, parse_alphabet)?;
        debug!(?symbols, "alphabet accepted");
        Ok(symbols)
    }

    /// Step 2: S, as one accept flag per state.
    pub fn states(&mut self) -> Result<Vec<bool>, ShellError> {
        writeln!(self.output, "\nStep 2: Define the set of states S")?;
        writeln!(self.output, "Please, enter the number of desired states:")?;
        let count = self.ask("\t|S| = ", None, parse_state_count)?;

        let mut accepting = Vec::new();
        for number in 1..=count {
            writeln!(self.output, "\nState \u{2116} {number}:")?;
            accepting.push(self.ask("Is it an accepting state? (y/n): ", None, parse_accepting)?);
        }
        debug!(count, "states accepted");
        Ok(accepting)
    }

    /// Step 3: δ, attached state by state.
    pub fn transitions(
        &mut self,
        builder: &mut AutomatonBuilder<char>,
        alphabet: &[char],
    ) -> Result<(), ShellError> {
        writeln!(self.output, "\nStep 3: Define the transition function \u{03B4}")?;
        writeln!(self.output, "{TRANSITION_FORMAT}")?;

        let count = builder.state_count();
        for index in 0..count {
            let state = StateId::new(index);
            let number = state.number();
            writeln!(self.output, "\n\tState \u{2116} {number}:")?;
            let links = self.ask(
                &format!("\t\u{03B4}({number}) = "),
                Some(TRANSITION_FORMAT),
                |line| parse_transitions(line, alphabet, count),
            )?;
            builder.add_transitions(state, links)?;
        }
        Ok(())
    }

    /// Step 4: s₀.
    pub fn start(&mut self, count: usize) -> Result<StateId, ShellError> {
        writeln!(self.output, "\nStep 4: Choose the start state s\u{2080}")?;
        writeln!(
            self.output,
            "Please enter the number corresponding to the desired state (from 1 to {count}):"
        )?;
        self.ask("\ts\u{2080} = ", None, |line| parse_start(line, count))
    }

    /// Runs all four steps and seals the result.
    pub fn acquire(&mut self) -> Result<Dfa<char>, ShellError> {
        let alphabet = self.alphabet()?;
        let accepting = self.states()?;

        let mut builder = AutomatonBuilder::new(alphabet.iter().copied());
        for is_accept in accepting {
            builder.insert_state(is_accept);
        }
        self.transitions(&mut builder, &alphabet)?;

        let start = self.start(builder.state_count())?;
        builder.set_start(start)?;
        let dfa = builder.build()?;

        writeln!(self.output, "\n --- Automaton created successfully! --- ")?;
        Ok(dfa)
    }
}

// MARK: Tests
#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_alphabet_keeps_whitespace() {
        assert_eq!(parse_alphabet("a, ,b").unwrap().as_slice(), &['a', ' ', 'b']);
        assert_eq!(parse_alphabet(" ").unwrap().as_slice(), &[' ']);
        assert_eq!(parse_alphabet("a,b,,").unwrap().as_slice(), &['a', 'b']);
    }

    #[test]
    fn test_alphabet_rejects() {
        assert_eq!(parse_alphabet(""), Err(InputError::Empty));
        assert_eq!(parse_alphabet(","), Err(InputError::NoSymbols));
        assert_eq!(parse_alphabet("ab,c"), Err(InputError::NotASymbol("ab".to_string())));
        assert_eq!(parse_alphabet("a,,b"), Err(InputError::NotASymbol(String::new())));
        assert_eq!(parse_alphabet(" a"), Err(InputError::NotASymbol(" a".to_string())));
    }

    #[test]
    fn test_state_count() {
        assert_eq!(parse_state_count(" 3 "), Ok(3));
        assert_eq!(parse_state_count("0"), Err(InputError::NotAPositiveNumber("0".to_string())));
        assert_eq!(parse_state_count("-2"), Err(InputError::NotAPositiveNumber("-2".to_string())));
        assert_eq!(parse_state_count("   "), Err(InputError::Empty));
    }

    #[test]
    fn test_accepting() {
        assert_eq!(parse_accepting("Y"), Ok(true));
        assert_eq!(parse_accepting(" n "), Ok(false));
        assert_eq!(parse_accepting("yes"), Err(InputError::NotYesNo));
        assert_eq!(parse_accepting(""), Err(InputError::Empty));
    }

    #[test]
    fn test_transitions() {
        let alphabet = ['a', ' '];
        let links = parse_transitions("a,2; , 1;", &alphabet, 2).unwrap();
        assert_eq!(links.as_slice(), &[('a', StateId::new(1)), (' ', StateId::new(0))]);
        assert!(parse_transitions("", &alphabet, 2).unwrap().is_empty());

        let links = parse_transitions("a,1;a,2", &alphabet, 2).unwrap();
        let mut state = fsa::State::new(false);
        state.add_transitions(links);
        assert_eq!(state.next('a'), Some(StateId::new(1)));
    }

    #[test]
    fn test_transitions_reject() {
        let alphabet = ['a'];
        assert_eq!(parse_transitions("b,1", &alphabet, 1), Err(InputError::UnknownSymbol('b')));
        assert_eq!(
            parse_transitions("a,3", &alphabet, 2),
            Err(InputError::StateOutOfRange { number: 3, count: 2 })
        );
        assert_eq!(
            parse_transitions("a", &alphabet, 2),
            Err(InputError::MalformedTransition("a".to_string()))
        );
        assert_eq!(
            parse_transitions("a,1,2", &alphabet, 2),
            Err(InputError::MalformedTransition("a,1,2".to_string()))
        );
        assert_eq!(
            parse_transitions("a,1;;a,2", &alphabet, 2),
            Err(InputError::MalformedTransition(String::new()))
        );
        assert_eq!(
            parse_transitions(" ", &alphabet, 2),
            Err(InputError::MalformedTransition(" ".to_string()))
        );
        assert_eq!(
            parse_transitions("a,0", &alphabet, 2),
            Err(InputError::NotAPositiveNumber("0".to_string()))
        );
    }

    #[test]
    fn test_start() {
        assert_eq!(parse_start(" 2", 2), Ok(StateId::new(1)));
        assert_eq!(parse_start("3", 2), Err(InputError::StateOutOfRange { number: 3, count: 2 }));
        assert_eq!(parse_start("", 2), Err(InputError::Empty));
    }

    #[test]
    fn test_retries_until_valid() {
        let input = Cursor::new("\nab\na,b\n0\nx\n2\nmaybe\nn\ny\nc,1\na,2;b,1\n\n7\n1\n");
        let mut output = Vec::new();
        let dfa = Acquisition::new(input, &mut output).acquire().unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("\"ab\" is not a single character"));
        assert!(output.contains("please answer with y or n"));
        assert!(output.contains("'c' is not in the alphabet"));
        assert!(output.contains("state 7 does not exist, choose from 1 to 2"));
        assert!(output.contains("Automaton created successfully"));

        assert_eq!(dfa.state_count(), 2);
        assert!(dfa.evaluate_str("a"));
        assert!(dfa.evaluate_str("bba"));
        assert!(!dfa.evaluate_str("aba"));
        assert!(!dfa.evaluate_str("b"));
    }

    #[test]
    fn test_exit_at_any_prompt() {
        for script in ["EXIT\n", "a\n  exit\n", "a\n1\nExit\n", "a\n1\ny\nexit\n", "a\n1\ny\n\nexit\n"] {
            let result = Acquisition::new(Cursor::new(script), Vec::new()).acquire();
            assert!(matches!(result, Err(ShellError::Exit)), "script {script:?}");
        }
    }

    #[test]
    fn test_end_of_input() {
        let result = Acquisition::new(Cursor::new("a\n2\ny\n"), Vec::new()).acquire();
        assert!(matches!(result, Err(ShellError::EndOfInput)));
    }
}
