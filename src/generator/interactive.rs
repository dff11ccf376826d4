use std::io::{BufRead, Write};

use crate::generator::{names::validate_name, GeneratorError, Target};

const CHOICES: [(Target, &str); 4] = [
    (Target::Module, "Complete Module (recommended)"),
    (Target::Model, "Model only"),
    (Target::Service, "Service only"),
    (Target::Controller, "Controller only"),
];

/// Asks for the artifact kind and the entity name, re-prompting until both are valid.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<(Target, String), GeneratorError> {
    let target = loop {
        writeln!(output, "What would you like to generate?")?;
        for (index, (_, label)) in CHOICES.iter().enumerate() {
            writeln!(output, "  {}) {label}", index + 1)?;
        }
        write!(output, "> ")?;
        output.flush()?;

        let answer = read_line(input)?;
        match parse_choice(&answer) {
            Some(target) => break target,
            None => writeln!(output, "Please pick 1-{} or a kind name", CHOICES.len())?,
        }
    };

    let name = loop {
        write!(output, "Enter the name (e.g., user, product, order): ")?;
        output.flush()?;
        match validate_name(&read_line(input)?) {
            Ok(name) => break name,
            Err(err) => writeln!(output, "{err}")?,
        }
    };

    Ok((target, name))
}

fn parse_choice(answer: &str) -> Option<Target> {
    let answer = answer.trim().to_lowercase();
    if let Ok(index) = answer.parse::<usize>() {
        return CHOICES.get(index.checked_sub(1)?).map(|(target, _)| *target);
    }
    CHOICES
        .iter()
        .map(|(target, _)| *target)
        .find(|target| target.as_str() == answer)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String, GeneratorError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(GeneratorError::Aborted);
    }
    Ok(line.trim().to_string())
}
