//! Step-by-step analysis wizard.
//!
//! Walks the pipeline one stage at a time so a front end can show the
//! intermediate chunks, actions and traits before the final verdict. Each
//! step runs the same pipeline functions as [`Analyzer`], nothing more.

use crate::analysis::{
    build_traits, compare_claims, extract_all, ActionRecord, Chunk, Claim, ComparisonResult, Trait,
};
use crate::analyzer::{AnalysisResult, Analyzer};
use crate::sample;
use thiserror::Error;
use tracing::debug;

/// Errors from advancing the wizard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Novel text is empty")]
    EmptyNovel,

    #[error("Character name is required")]
    MissingCharacterName,

    #[error("The analysis is already complete")]
    AlreadyFinished,

    #[error("No result yet; the wizard is on step {0}")]
    NoResult(usize),
}

/// Steps of the wizard, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    StoreStory,
    FindCharacter,
    ExtractActions,
    BuildTraits,
    GetClaims,
    Compare,
    FinalDecision,
    Explain,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::StoreStory,
            WizardStep::FindCharacter,
            WizardStep::ExtractActions,
            WizardStep::BuildTraits,
            WizardStep::GetClaims,
            WizardStep::Compare,
            WizardStep::FinalDecision,
            WizardStep::Explain,
        ]
    }

    /// Position of the step, 1 through 8.
    pub fn number(&self) -> usize {
        match self {
            WizardStep::StoreStory => 1,
            WizardStep::FindCharacter => 2,
            WizardStep::ExtractActions => 3,
            WizardStep::BuildTraits => 4,
            WizardStep::GetClaims => 5,
            WizardStep::Compare => 6,
            WizardStep::FinalDecision => 7,
            WizardStep::Explain => 8,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::StoreStory => "Store Story",
            WizardStep::FindCharacter => "Find Character",
            WizardStep::ExtractActions => "Extract Actions",
            WizardStep::BuildTraits => "Build Traits",
            WizardStep::GetClaims => "Get Claims",
            WizardStep::Compare => "Compare",
            WizardStep::FinalDecision => "Final Decision",
            WizardStep::Explain => "Explain",
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::StoreStory => Some(WizardStep::FindCharacter),
            WizardStep::FindCharacter => Some(WizardStep::ExtractActions),
            WizardStep::ExtractActions => Some(WizardStep::BuildTraits),
            WizardStep::BuildTraits => Some(WizardStep::GetClaims),
            WizardStep::GetClaims => Some(WizardStep::Compare),
            WizardStep::Compare => Some(WizardStep::FinalDecision),
            WizardStep::FinalDecision => Some(WizardStep::Explain),
            WizardStep::Explain => None,
        }
    }

    pub fn prev(&self) -> Option<WizardStep> {
        match self {
            WizardStep::StoreStory => None,
            WizardStep::FindCharacter => Some(WizardStep::StoreStory),
            WizardStep::ExtractActions => Some(WizardStep::FindCharacter),
            WizardStep::BuildTraits => Some(WizardStep::ExtractActions),
            WizardStep::GetClaims => Some(WizardStep::BuildTraits),
            WizardStep::Compare => Some(WizardStep::GetClaims),
            WizardStep::FinalDecision => Some(WizardStep::Compare),
            WizardStep::Explain => Some(WizardStep::FinalDecision),
        }
    }
}

/// Wizard state.
///
/// The drafted inputs (`novel_text`, `character_name`, `claims`) can be
/// edited at any time; they are read when the step that consumes them is
/// advanced.
pub struct AnalysisWizard {
    analyzer: Analyzer,
    step: WizardStep,

    pub novel_text: String,
    pub character_name: String,
    pub claims: Vec<Claim>,

    chunks: Vec<Chunk>,
    actions: Vec<ActionRecord>,
    traits: Vec<Trait>,
    /// The claims `comparisons` was computed from.
    compared_claims: Vec<Claim>,
    comparisons: Vec<ComparisonResult>,
    result: Option<AnalysisResult>,
}

impl AnalysisWizard {
    /// Create an empty wizard on the first step.
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            step: WizardStep::StoreStory,
            novel_text: String::new(),
            character_name: String::new(),
            claims: Vec::new(),
            chunks: Vec::new(),
            actions: Vec::new(),
            traits: Vec::new(),
            compared_claims: Vec::new(),
            comparisons: Vec::new(),
            result: None,
        }
    }

    /// Create a wizard pre-filled with the sample novel, character and claims.
    pub fn with_sample(analyzer: Analyzer) -> Self {
        let mut wizard = Self::new(analyzer);
        wizard.novel_text = sample::SAMPLE_NOVEL.to_string();
        wizard.character_name = sample::SAMPLE_CHARACTER.to_string();
        wizard.claims = sample::default_claims();
        wizard
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    pub fn traits(&self) -> &[Trait] {
        &self.traits
    }

    pub fn comparisons(&self) -> &[ComparisonResult] {
        &self.comparisons
    }

    /// The result, only while on the last step.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self.step {
            WizardStep::Explain => self.result.as_ref(),
            _ => None,
        }
    }

    /// The result, or an error naming the current step if it isn't ready.
    pub fn finished_result(&self) -> Result<&AnalysisResult, WizardError> {
        self.result()
            .ok_or(WizardError::NoResult(self.step.number()))
    }

    /// Check whether the final step has been reached.
    pub fn is_finished(&self) -> bool {
        self.result.is_some() && self.step == WizardStep::Explain
    }

    /// Run the current step's stage and move to the next step.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let next = self.step.next().ok_or(WizardError::AlreadyFinished)?;

        match self.step {
            WizardStep::StoreStory => {
                if self.novel_text.trim().is_empty() {
                    return Err(WizardError::EmptyNovel);
                }
                self.chunks = self.analyzer.chunk(&self.novel_text);
            }
            WizardStep::FindCharacter => {
                if self.character_name.trim().is_empty() {
                    return Err(WizardError::MissingCharacterName);
                }
                self.character_name = self.character_name.trim().to_string();
            }
            WizardStep::ExtractActions => {
                self.actions = extract_all(&self.chunks);
            }
            WizardStep::BuildTraits => {
                self.traits = build_traits(&self.actions);
            }
            WizardStep::GetClaims => {}
            WizardStep::Compare => {
                self.compared_claims = self.claims.clone();
                self.comparisons = compare_claims(&self.compared_claims, &self.traits);
            }
            WizardStep::FinalDecision => {
                self.result = Some(AnalysisResult::from_stages(
                    &self.character_name,
                    self.compared_claims.clone(),
                    self.chunks.clone(),
                    self.actions.clone(),
                    self.traits.clone(),
                    self.comparisons.clone(),
                ));
            }
            WizardStep::Explain => return Err(WizardError::AlreadyFinished),
        }

        debug!(from = self.step.number(), to = next.number(), "wizard advanced");
        self.step = next;
        Ok(next)
    }

    /// Move back one step, keeping the stage outputs. Returns `false` on the
    /// first step.
    ///
    /// The finished result is dropped, since the stages may be re-run with
    /// different inputs before step 8 is reached again.
    pub fn back(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                self.result = None;
                true
            }
            None => false,
        }
    }

    /// Discard computed state and return to the first step.
    ///
    /// Drafted inputs are kept so the same story can be re-run.
    pub fn reset(&mut self) {
        self.step = WizardStep::StoreStory;
        self.chunks.clear();
        self.actions.clear();
        self.traits.clear();
        self.compared_claims.clear();
        self.comparisons.clear();
        self.result = None;
    }
}
