//! Rule compilation and indexing.
//!
//! This module holds the *static* side of the engine: the structures derived
//! from the full rule list that make a run cheap and keep the stage order
//! explicit.
//!
//! Parsing is split into two phases:
//!
//! 1. **Compile/index rules** (this module): validate every rule's declared
//!    capture arity against its stage and its regex, then index rules by
//!    stage, preserving table order inside each stage.
//! 2. **Run** (see `parser.rs`): normalize the statement, scan it for coarse
//!    triggers (`trigger.rs`), select the rules whose buckets are present,
//!    and fold the three stages over the working text.
//!
//! ## Invariants
//!
//! - `RuleId` is an index into `CompiledRules::rules` and
//!   `CompiledRules::metas`. Those vectors stay aligned.
//! - `RuleIndex::by_stage[stage as usize]` lists rule ids in table order.
//! - A compiled table never contains a rule whose arity is wrong for its
//!   stage; `CompiledRules::new` refuses it.

use crate::{HoldingsError, Result, Rule, Stage};

/// Rule identifier (index into the rules vector).
pub(crate) type RuleId = usize;

pub const STAGE_COUNT: usize = Stage::ORDER.len();

bitflags::bitflags! {
    /// Coarse features of a normalized statement.
    ///
    /// A rule lists the features its regex cannot match without; it only
    /// runs when the statement shows all of them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u32 {
        const HAS_DIGITS = 1 << 0;
        const HAS_HYPHEN = 1 << 1;
        const HAS_SLASH  = 1 << 2;
        const HAS_COLON  = 1 << 3;
        const HAS_PAREN  = 1 << 4;
        const HAS_PLUS   = 1 << 5;
        const OPEN_ENDED = 1 << 6;
    }
}

/// Metadata attached to a rule.
#[derive(Clone, Copy, Debug)]
pub struct RuleMeta {
    pub stage: Stage,
    pub buckets: BucketMask,
}

#[derive(Default, Debug)]
pub struct RuleIndex {
    pub by_stage: [Vec<RuleId>; STAGE_COUNT],
}

/// Pre-compiled, validated rule set.
#[derive(Debug)]
pub struct CompiledRules<'a> {
    pub rules: Vec<&'a Rule>,
    pub metas: Vec<RuleMeta>,
    pub index: RuleIndex,
}

impl<'a> CompiledRules<'a> {
    /// Validate and index `rules`.
    ///
    /// # Errors
    ///
    /// [`HoldingsError::CaptureArity`] when a rule declares an arity its
    /// stage does not accept, or when its regex has a different number of
    /// capture groups than declared.
    pub fn new(rules: &'a [Rule]) -> Result<Self> {
        let rule_refs: Vec<&Rule> = rules.iter().collect();

        for rule in &rule_refs {
            check_arity(rule)?;
        }

        let metas: Vec<RuleMeta> = rule_refs
            .iter()
            .map(|r| RuleMeta { stage: r.stage, buckets: BucketMask::from_bits_truncate(r.buckets) })
            .collect();

        let mut index = RuleIndex::default();
        for (id, meta) in metas.iter().enumerate() {
            index.by_stage[meta.stage as usize].push(id);
        }

        Ok(CompiledRules { rules: rule_refs, metas, index })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

fn check_arity(rule: &Rule) -> Result<()> {
    let found = rule.pattern.captures_len().saturating_sub(1);
    let allowed = rule.stage.allowed_arities();

    if !allowed.contains(&rule.arity) {
        return Err(HoldingsError::CaptureArity {
            rule: rule.name,
            expected: rule.stage.arity_description(),
            found: rule.arity,
        });
    }
    if found != rule.arity {
        return Err(HoldingsError::CaptureArity {
            rule: rule.name,
            expected: rule.stage.arity_description(),
            found,
        });
    }
    Ok(())
}
