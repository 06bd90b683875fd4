use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{save_decision, DecisionFile, OptionSpec, VariableSpec};
use crate::scoring::{ValueEntry, VariableType};

const DEFAULT_DECISION_PATH: &str = "decision.yaml";
const TYPING_DELAY: Duration = Duration::from_millis(18);

/// Interactive prompts over any reader/writer pair.
struct Wizard<R, W> {
    input: R,
    output: W,
    typing_delay: Duration,
}

impl<R: BufRead, W: Write> Wizard<R, W> {
    /// Prompt user with a message and return their trimmed input.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;
        let mut input = String::new();
        self.input
            .read_line(&mut input)
            .context("Failed to read input")?;
        Ok(input.trim().to_string())
    }

    /// Prompt with a default value. Returns default if input is empty.
    fn prompt_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        let input = self.prompt(&format!("{} [{}]: ", message, default))?;
        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    /// Prompt with a yes/no question. Returns bool based on input and default.
    fn prompt_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let input = self.prompt(&format!("{} [{}]: ", message, hint))?;
        let input = input.to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(input == "y" || input == "yes")
        }
    }

    /// Prompt until the answer parses as a number in `min..=max`.
    fn prompt_number(&mut self, message: &str, default: f64, min: f64, max: f64) -> Result<f64> {
        loop {
            let answer = self.prompt_with_default(message, &default.to_string())?;
            match answer.parse::<f64>() {
                Ok(v) if v >= min && v <= max => return Ok(v),
                Ok(_) => self.line(&format!("  Invalid: must be between {} and {}. Try again.", min, max))?,
                Err(_) => self.line("  Invalid: must be a number. Try again.")?,
            }
        }
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write output")
    }

    /// Print text with a typewriter effect, one character at a time.
    fn typewriter(&mut self, text: &str) -> Result<()> {
        for c in text.chars() {
            write!(self.output, "{}", c).context("Failed to write output")?;
            if !self.typing_delay.is_zero() {
                self.output.flush().ok();
                std::thread::sleep(self.typing_delay);
            }
        }
        self.line("")
    }

    fn collect_decision(&mut self) -> Result<DecisionFile> {
        self.line("")?;
        self.typewriter("Quantum Decision Wizard")?;
        self.line("=======================")?;
        self.line("")?;

        let name = self.prompt_with_default("Decision name", "Новое решение")?;

        // 1. Variables
        self.line("")?;
        self.typewriter("Variables are the factors that matter for this decision.")?;
        self.typewriter("Each has a type and a weight from 1 (minor) to 10 (critical).")?;
        let type_names = VariableType::ALL
            .iter()
            .map(VariableType::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        let mut variables: Vec<VariableSpec> = Vec::new();
        loop {
            let number = variables.len() + 1;
            let var_name = self.prompt_with_default(
                &format!("  Variable {} name", number),
                &format!("Переменная {}", number),
            )?;
            let kind = loop {
                let answer = self.prompt_with_default(&format!("  Type ({})", type_names), "cost")?;
                match VariableType::parse(&answer) {
                    Some(kind) => break kind,
                    None => self.line(&format!("  Invalid type '{}'. Try again.", answer))?,
                }
            };
            let weight = self.prompt_number("  Weight (1-10)", 5.0, 1.0, 10.0)?;

            variables.push(VariableSpec {
                name: Some(var_name),
                kind: Some(kind),
                weight: Some(weight),
            });

            if !self.prompt_yes_no("Add another variable?", variables.len() < 3)? {
                break;
            }
        }

        // 2. Options
        self.line("")?;
        self.typewriter("Options are the candidates. Rate each one against every variable from 1 to 10.")?;
        self.typewriter("The qubit position (0-100) is only read by the qubit policy.")?;

        let mut options: Vec<OptionSpec> = Vec::new();
        loop {
            let letter = u8::try_from(options.len())
                .ok()
                .filter(|n| *n < 26)
                .map(|n| char::from(b'A' + n).to_string())
                .unwrap_or_else(|| (options.len() + 1).to_string());
            let opt_name =
                self.prompt_with_default("  Option name", &format!("Вариант {}", letter))?;
            let qubit = self.prompt_number("  Qubit position (0-100)", 50.0, 0.0, 100.0)?;

            let mut values = Vec::with_capacity(variables.len());
            for (i, variable) in variables.iter().enumerate() {
                let label = variable.name.clone().unwrap_or_default();
                let value = self.prompt_number(&format!("    {} (1-10)", label), 5.0, 1.0, 10.0)?;
                let variable_id = u32::try_from(i + 1).context("Too many variables")?;
                values.push(ValueEntry::new(variable_id, value));
            }

            options.push(OptionSpec {
                name: Some(opt_name),
                qubit: Some(qubit),
                values: Some(values),
            });

            if !self.prompt_yes_no("Add another option?", options.len() < 2)? {
                break;
            }
        }

        Ok(DecisionFile {
            name: Some(name),
            variables,
            options,
        })
    }

    fn run(&mut self, default_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
        let decision = self.collect_decision()?;

        // 3. Output path
        let default_path = default_path.unwrap_or_else(|| PathBuf::from(DEFAULT_DECISION_PATH));
        self.line("")?;
        let path_str = self.prompt_with_default(
            "Where should the decision be saved?",
            &default_path.display().to_string(),
        )?;
        let path = PathBuf::from(&path_str);

        if path.exists() {
            let overwrite = self.prompt_yes_no(
                &format!("File already exists at {}. Overwrite?", path.display()),
                false,
            )?;
            if !overwrite {
                self.line("Aborted.")?;
                return Ok(None);
            }
        }

        save_decision(&path, &decision)?;

        self.line("")?;
        self.line(&format!("Decision written to {}", path.display()))?;
        self.line(&format!("Run `qdecide analyze {}` to score it.", path.display()))?;

        Ok(Some(path))
    }
}

/// Run the interactive wizard that writes a decision file.
///
/// If `default_path` is Some, it is offered as the save location; otherwise
/// `decision.yaml` in the current directory.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut wizard = Wizard {
        input: stdin.lock(),
        output: std::io::stdout(),
        typing_delay: TYPING_DELAY,
    };
    wizard.run(default_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_decision;
    use std::env;
    use std::io::Cursor;

    fn wizard(script: &str) -> Wizard<Cursor<Vec<u8>>, Vec<u8>> {
        Wizard {
            input: Cursor::new(script.as_bytes().to_vec()),
            output: Vec::new(),
            typing_delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_prompt_with_default_uses_default_on_empty() {
        let mut w = wizard("\n");
        assert_eq!(w.prompt_with_default("Name", "x").unwrap(), "x");
    }

    #[test]
    fn test_prompt_yes_no() {
        let mut w = wizard("yes\n\nn\n");
        assert!(w.prompt_yes_no("?", false).unwrap());
        assert!(w.prompt_yes_no("?", true).unwrap());
        assert!(!w.prompt_yes_no("?", true).unwrap());
    }

    #[test]
    fn test_prompt_number_retries_until_in_range() {
        let mut w = wizard("abc\n42\n7\n");
        assert_eq!(w.prompt_number("Weight", 5.0, 1.0, 10.0).unwrap(), 7.0);
        let printed = String::from_utf8(w.output).unwrap();
        assert!(printed.contains("must be a number"));
        assert!(printed.contains("must be between 1 and 10"));
    }

    #[test]
    fn test_collect_decision() {
        let script = [
            "Переезд",    // decision name
            "Цена",       // variable 1 name
            "cost",       // type
            "8",          // weight
            "y",          // another variable
            "",           // variable 2 name -> default
            "luck",       // invalid type
            "quality",    // type
            "",           // weight -> 5
            "n",          // no more variables
            "Центр",      // option name
            "70",         // qubit
            "3",          // rating for Цена
            "9",          // rating for variable 2
            "n",          // no more options
        ]
        .join("\n")
            + "\n";
        let mut w = wizard(&script);
        let decision = w.collect_decision().unwrap();

        assert_eq!(decision.name.as_deref(), Some("Переезд"));
        assert_eq!(decision.variables.len(), 2);
        assert_eq!(decision.variables[0].weight, Some(8.0));
        assert_eq!(decision.variables[1].name.as_deref(), Some("Переменная 2"));
        assert_eq!(decision.variables[1].kind, Some(VariableType::Quality));
        assert_eq!(decision.variables[1].weight, Some(5.0));
        assert_eq!(decision.options.len(), 1);
        assert_eq!(decision.options[0].qubit, Some(70.0));
        assert_eq!(
            decision.options[0].values,
            Some(vec![ValueEntry::new(1, 3.0), ValueEntry::new(2, 9.0)])
        );
    }

    #[test]
    fn test_run_writes_file() {
        let temp_path = env::temp_dir().join("qdecide_test_wizard_output.yaml");
        let _ = std::fs::remove_file(&temp_path);

        let script = ["", "", "", "", "n", "", "", "", "n", ""].join("\n") + "\n";
        let mut w = wizard(&script);
        let written = w.run(Some(temp_path.clone())).unwrap();
        assert_eq!(written.as_deref(), Some(temp_path.as_path()));

        let decision = load_decision(&temp_path).unwrap();
        assert_eq!(decision.name.as_deref(), Some("Новое решение"));
        assert_eq!(decision.variables.len(), 1);
        assert_eq!(decision.options[0].name.as_deref(), Some("Вариант A"));

        let _ = std::fs::remove_file(&temp_path);
    }
}
