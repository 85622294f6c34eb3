//! Command implementations.

use clap::Args;

use mstp_lint_core::config::Config;
use mstp_lint_core::engine::{MatchMode, RuleEngine, RuleSwitch, RuleToggles};
use mstp_lint_core::terms::TermPair;

pub mod check;
pub mod info;
pub mod review;
pub mod scan;

/// Rule options shared by `scan`, `review`, and `check`.
#[derive(Args, Debug, Default)]
pub struct RuleArgs {
    /// Disable a rule by name (repeatable)
    #[arg(long = "skip", value_enum, value_name = "RULE")]
    pub skip: Vec<RuleSwitch>,

    /// Extra find=replace pair, applied after configured terms (repeatable)
    #[arg(long = "term", value_name = "FIND=REPLACE", value_parser = parse_term)]
    pub terms: Vec<TermPair>,

    /// How custom and UI terms are matched
    #[arg(long, value_enum)]
    pub match_mode: Option<MatchMode>,
}

impl RuleArgs {
    /// Rule toggles: config file settings with `--skip` flags applied.
    pub fn toggles(&self, config: &Config) -> RuleToggles {
        let mut toggles = config.rules;
        for &rule in &self.skip {
            toggles.disable(rule);
        }
        toggles
    }

    /// Build the engine: configured terms first, then `--term` pairs in
    /// flag order.
    pub fn engine(&self, config: &Config) -> RuleEngine {
        let mode = self
            .match_mode
            .or(config.match_mode)
            .unwrap_or_default();
        let mut engine = RuleEngine::new().with_match_mode(mode);
        engine.terms_mut().set_terms(config.terms.clone());
        for pair in &self.terms {
            engine.terms_mut().add_term(&pair.find, &pair.replace);
        }
        engine
    }
}

/// Parse a `find=replace` flag value, splitting on the first `=`.
fn parse_term(value: &str) -> Result<TermPair, String> {
    let Some((find, replace)) = value.split_once('=') else {
        return Err(format!("expected FIND=REPLACE, got {value:?}"));
    };
    if find.is_empty() || replace.is_empty() {
        return Err("both FIND and REPLACE must be non-empty".to_string());
    }
    Ok(TermPair::new(find, replace))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_term_splits_on_first_equals() {
        let pair = parse_term("a=b=c").unwrap();
        assert_eq!(pair.find, "a");
        assert_eq!(pair.replace, "b=c");
    }

    #[test]
    fn parse_term_rejects_missing_parts() {
        assert!(parse_term("noequals").is_err());
        assert!(parse_term("=x").is_err());
        assert!(parse_term("x=").is_err());
    }

    #[test]
    fn skip_flags_disable_configured_rules() {
        let args = RuleArgs {
            skip: vec![RuleSwitch::Ui, RuleSwitch::Headings],
            ..RuleArgs::default()
        };
        let toggles = args.toggles(&Config::default());
        assert!(!toggles.ui);
        assert!(!toggles.headings);
        assert!(toggles.grammar);
    }

    #[test]
    fn cli_terms_append_after_config_terms() {
        let config = Config {
            terms: vec![TermPair::new("utilize", "use")],
            ..Config::default()
        };
        let args = RuleArgs {
            terms: vec![TermPair::new("click on", "click")],
            ..RuleArgs::default()
        };
        let engine = args.engine(&config);
        let finds: Vec<_> = engine.terms().iter().map(|p| p.find.as_str()).collect();
        assert_eq!(finds, ["utilize", "click on"]);
    }
}
