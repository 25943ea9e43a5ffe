//! Ordered brand-substitution rules.
//!
//! Rules are applied in sequence, each to the output of the previous one. A [`RuleSet`]
//! refuses an ordering where an earlier rule's pattern matches inside a later rule's
//! pattern, since the later rule could then never fire.

use crate::error::AnnotateError;
use regex::{NoExpand, Regex, RegexBuilder};
use tracing::{debug, error};

/// A literal phrase and the text that replaces each occurrence of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRule {
    pub pattern: &'static str,
    pub replacement: &'static str,
    pub case_insensitive: bool,
}

impl SubstitutionRule {
    pub const fn ignore_case(pattern: &'static str, replacement: &'static str) -> Self {
        Self {
            pattern,
            replacement,
            case_insensitive: true,
        }
    }
}

/// Built-in brand rules, most specific first.
pub const BRAND_RULES: &[SubstitutionRule] = &[
    SubstitutionRule::ignore_case("claude.com/claude-code", "solsniper.pro"),
    SubstitutionRule::ignore_case("noreply@anthropic.com", "44158892@qq.com"),
    SubstitutionRule::ignore_case("Claude Code", "SolSniper Pro"),
    SubstitutionRule::ignore_case("Claude Sonnet 4.5", "AI Assistant"),
    SubstitutionRule::ignore_case("Claude Sonnet", "AI Assistant"),
    SubstitutionRule::ignore_case("Claude Opus", "AI Assistant"),
    SubstitutionRule::ignore_case("Claude", "AI"),
    SubstitutionRule::ignore_case("Anthropic", "AI Platform"),
];

struct CompiledRule {
    rule: SubstitutionRule,
    regex: Regex,
}

/// A validated, compiled sequence of substitution rules.
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

/// Result of running a [`RuleSet`] over some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted {
    pub content: String,
    pub replacements: usize,
    /// Whether `content` differs from the input.
    pub changed: bool,
}

fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex, AnnotateError> {
    RegexBuilder::new(&regex::escape(pattern))
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| AnnotateError::InvalidPattern {
            pattern: pattern.to_string(),
            source: e,
        })
}

/// Whether `earlier` would rewrite text that `later` is meant to match.
fn shadows(earlier: &CompiledRule, later: &SubstitutionRule) -> Result<bool, AnnotateError> {
    if earlier.rule.case_insensitive || !later.case_insensitive {
        return Ok(earlier.regex.is_match(later.pattern));
    }
    // `later` matches every casing of its pattern, so any casing of `earlier` counts.
    Ok(compile(earlier.rule.pattern, true)?.is_match(later.pattern))
}

impl RuleSet {
    pub fn new(rules: &[SubstitutionRule]) -> Result<Self, AnnotateError> {
        let mut compiled: Vec<CompiledRule> = Vec::with_capacity(rules.len());
        for rule in rules {
            let regex = compile(rule.pattern, rule.case_insensitive)?;
            for earlier in &compiled {
                if shadows(earlier, rule)? {
                    error!(
                        earlier = earlier.rule.pattern,
                        later = rule.pattern,
                        "Substitution rule shadows a later rule"
                    );
                    return Err(AnnotateError::RuleOrder {
                        earlier: earlier.rule.pattern.to_string(),
                        later: rule.pattern.to_string(),
                    });
                }
            }
            compiled.push(CompiledRule {
                rule: rule.clone(),
                regex,
            });
        }
        Ok(Self { rules: compiled })
    }

    /// Compile the built-in [`BRAND_RULES`].
    pub fn brand() -> Result<Self, AnnotateError> {
        Self::new(BRAND_RULES)
    }

    pub fn rules(&self) -> impl Iterator<Item = &SubstitutionRule> {
        self.rules.iter().map(|c| &c.rule)
    }

    pub fn apply(&self, content: &str) -> Substituted {
        let mut current = content.to_string();
        let mut replacements = 0;
        for compiled in &self.rules {
            let hits = compiled.regex.find_iter(&current).count();
            if hits == 0 {
                continue;
            }
            current = compiled
                .regex
                .replace_all(&current, NoExpand(compiled.rule.replacement))
                .into_owned();
            debug!(
                pattern = compiled.rule.pattern,
                replacement = compiled.rule.replacement,
                hits,
                "Applied substitution rule"
            );
            replacements += hits;
        }
        Substituted {
            changed: current != content,
            content: current,
            replacements,
        }
    }
}
