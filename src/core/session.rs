use crate::config::AppSettings;
use crate::core::calculator::RoiCalculator;
use crate::core::display;
use crate::domain::model::{InputField, InputRecord, RoiProjection};
use crate::utils::error::{Result, RoiError};
use std::str::FromStr;

pub const HELP_TEXT: &str = "\
Commands:
  show                     list the inputs and the last result
  set <field> <value>      change an input (also <field>=<value>)
  advanced                 show or hide the advanced assumptions
  calculate | calc         compute the projection
  help                     this text
  quit | exit              leave";

/// Coerces a text entry to a number. Blank, unparsable and non-finite
/// entries become zero.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Show,
    Set(InputField, f64),
    ToggleAdvanced,
    Calculate,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self> {
        let line = s.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb.to_ascii_lowercase(), rest.trim()),
            None => (line.to_ascii_lowercase(), ""),
        };

        // `<field>=<value>` 可以單獨使用，也可以接在 set 後面
        let assignment = if verb == "set" { rest } else { line };
        if let Some((field, value)) = assignment.split_once('=') {
            return Ok(Command::Set(field.parse()?, coerce_number(value)));
        }

        match verb.as_str() {
            "show" | "" => Ok(Command::Show),
            "set" => {
                let mut words = rest.split_whitespace();
                let field = words.next().ok_or_else(|| RoiError::UnknownCommand {
                    input: line.to_string(),
                })?;
                let value = words.collect::<Vec<_>>().join(" ");
                Ok(Command::Set(field.parse()?, coerce_number(&value)))
            }
            "advanced" => Ok(Command::ToggleAdvanced),
            "calculate" | "calc" => Ok(Command::Calculate),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(RoiError::UnknownCommand {
                input: line.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// State behind one calculator screen: the current inputs, whether the
/// advanced block is expanded, and the last result.
pub struct Session {
    calculator: RoiCalculator,
    inputs: InputRecord,
    show_advanced: bool,
    result: Option<RoiProjection>,
}

impl Session {
    pub fn new(calculator: RoiCalculator, settings: &AppSettings) -> Self {
        Self {
            calculator,
            inputs: settings.inputs,
            show_advanced: settings.show_advanced,
            result: None,
        }
    }

    pub fn inputs(&self) -> InputRecord {
        self.inputs
    }

    pub fn show_advanced(&self) -> bool {
        self.show_advanced
    }

    pub fn result(&self) -> Option<RoiProjection> {
        self.result
    }

    pub fn calculator(&self) -> &RoiCalculator {
        &self.calculator
    }

    pub fn edit(&mut self, field: InputField, value: f64) {
        self.inputs = self.inputs.with(field, value);
    }

    pub fn toggle_advanced(&mut self) -> bool {
        self.show_advanced = !self.show_advanced;
        self.show_advanced
    }

    pub fn calculate(&mut self) -> RoiProjection {
        let projection = self.calculator.calculate(self.inputs);
        self.result = Some(projection);
        projection
    }

    pub fn handle(&mut self, command: Command) -> Reply {
        match command {
            Command::Show => Reply::Text(self.render()),
            Command::Set(field, value) => {
                self.edit(field, value);
                Reply::Text(format!("{} = {}", field, value))
            }
            Command::ToggleAdvanced => {
                self.toggle_advanced();
                Reply::Text(display::render_inputs(&self.inputs, self.show_advanced))
            }
            Command::Calculate => {
                let projection = self.calculate();
                Reply::Text(display::render_projection(&projection))
            }
            Command::Help => Reply::Text(HELP_TEXT.to_string()),
            Command::Quit => Reply::Quit,
        }
    }

    /// Parses and runs one input line.
    pub fn handle_line(&mut self, line: &str) -> Result<Reply> {
        let command: Command = line.parse()?;
        Ok(self.handle(command))
    }

    pub fn render(&self) -> String {
        let mut out = display::render_inputs(&self.inputs, self.show_advanced);
        if let Some(projection) = &self.result {
            out.push_str("\n\n");
            out.push_str(&display::render_projection(projection));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sink::SubmissionSink;

    fn session() -> Session {
        Session::new(
            RoiCalculator::new(SubmissionSink::inert()),
            &AppSettings::default(),
        )
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("42"), 42.0);
        assert_eq!(coerce_number(" -3.5 "), -3.5);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!("calc".parse::<Command>().unwrap(), Command::Calculate);
        assert_eq!("  QUIT ".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("".parse::<Command>().unwrap(), Command::Show);
        assert_eq!(
            "set book_price 24.99".parse::<Command>().unwrap(),
            Command::Set(InputField::BookPrice, 24.99)
        );
        assert_eq!(
            "dealSizeLiftPct=25".parse::<Command>().unwrap(),
            Command::Set(InputField::DealSizeLiftPct, 25.0)
        );
        assert_eq!(
            "set book_price=5".parse::<Command>().unwrap(),
            Command::Set(InputField::BookPrice, 5.0)
        );
        assert_eq!(
            "SET speaking_fee = 2500".parse::<Command>().unwrap(),
            Command::Set(InputField::SpeakingFee, 2_500.0)
        );
        assert_eq!(
            "set copies_sold lots".parse::<Command>().unwrap(),
            Command::Set(InputField::CopiesSold, 0.0)
        );
    }

    #[test]
    fn test_command_parsing_errors() {
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(RoiError::UnknownCommand { .. })
        ));
        assert!(matches!(
            "set".parse::<Command>(),
            Err(RoiError::UnknownCommand { .. })
        ));
        assert!(matches!(
            "set royalties 5".parse::<Command>(),
            Err(RoiError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_no_result_until_calculate() {
        let mut session = session();
        assert!(session.result().is_none());

        session.edit(InputField::CopiesSold, 1_000.0);
        assert!(session.result().is_none());

        let projection = session.calculate();
        assert_eq!(projection.gross_revenue, 85_000.0);
        assert_eq!(session.result(), Some(projection));
    }

    #[test]
    fn test_result_is_replaced_on_each_calculate() {
        let mut session = session();
        let first = session.calculate();

        session.edit(InputField::PackageCost, 80_000.0);
        // 編輯後舊結果仍保留，直到下一次 calculate
        assert_eq!(session.result(), Some(first));

        let second = session.calculate();
        assert_eq!(second.roi_percent, 0.0);
        assert_eq!(session.result(), Some(second));
    }

    #[test]
    fn test_advanced_visibility_does_not_change_projection() {
        let mut session = session();
        session.edit(InputField::EmailSubscribers, 2_000.0);

        let hidden = session.calculate();
        assert!(session.toggle_advanced());
        let shown = session.calculate();
        assert!(!session.toggle_advanced());
        let hidden_again = session.calculate();

        assert_eq!(hidden, shown);
        assert_eq!(shown, hidden_again);
        assert_eq!(hidden.breakdown.email, 10_000.0);
    }

    #[test]
    fn test_handle_line_flow() {
        let mut session = session();

        assert_eq!(
            session.handle_line("set deal_size_lift_pct 0").unwrap(),
            Reply::Text("deal_size_lift_pct = 0".to_string())
        );

        match session.handle_line("calculate").unwrap() {
            Reply::Text(text) => {
                assert!(text.contains("$75,000"));
                assert!(text.contains("ROI: 50.0%"));
            }
            Reply::Quit => panic!("unexpected quit"),
        }

        assert!(session.render().contains("Projected Gross Revenue: $75,000"));
        assert_eq!(session.handle_line("exit").unwrap(), Reply::Quit);
    }

    #[test]
    fn test_settings_seed_the_session() {
        let settings = AppSettings {
            inputs: InputRecord::default().with(InputField::SpeakingGigs, 0.0),
            submission: None,
            show_advanced: true,
        };
        let session = Session::new(RoiCalculator::new(SubmissionSink::inert()), &settings);

        assert!(session.show_advanced());
        assert_eq!(session.inputs().speaking_gigs, 0.0);
        assert!(!session.calculator().sink().is_enabled());
    }
}
