//! Tests for walking the step wizard end to end.

use plotiq_core::sample::default_claims;
use plotiq_core::{
    parse_claims, write_report, AnalysisConfig, AnalysisWizard, Analyzer, WizardError, WizardStep,
};

fn six_word_analyzer() -> Analyzer {
    Analyzer::new(
        AnalysisConfig::new()
            .with_min_words(6)
            .with_max_words(6)
            .with_seed(9),
    )
    .unwrap()
}

fn advance_to(wizard: &mut AnalysisWizard, step: WizardStep) {
    while wizard.step() != step {
        wizard.advance().unwrap();
    }
}

#[tokio::test]
async fn test_wizard_matches_one_shot_analysis() {
    let analyzer = six_word_analyzer();
    let novel = "He decided to attack the guard. She chose to rebel against them. \
                 They went to fight the beast."
        .to_string();

    let mut wizard = AnalysisWizard::new(analyzer.clone());
    wizard.novel_text = novel.clone();
    wizard.character_name = "Marcus".to_string();
    wizard.claims = default_claims();

    advance_to(&mut wizard, WizardStep::Explain);
    let stepped = wizard.finished_result().unwrap();
    let one_shot = analyzer.run(&novel, "Marcus", &default_claims());

    assert_eq!(stepped.chunks, one_shot.chunks);
    assert_eq!(stepped.actions, one_shot.actions);
    assert_eq!(stepped.traits, one_shot.traits);
    assert_eq!(stepped.comparisons, one_shot.comparisons);
    assert_eq!(stepped.final_decision, one_shot.final_decision);
    assert_eq!(stepped.explanation, one_shot.explanation);
}

#[tokio::test]
async fn test_intermediate_state_visible_per_step() {
    let mut wizard = AnalysisWizard::new(six_word_analyzer());
    wizard.novel_text = "He decided to attack the guard. ".repeat(2);
    wizard.character_name = "Marcus".to_string();

    advance_to(&mut wizard, WizardStep::ExtractActions);
    assert_eq!(wizard.chunks().len(), 2);
    assert!(wizard.actions().is_empty());

    wizard.advance().unwrap();
    assert_eq!(wizard.actions().len(), 2);
    assert!(wizard.traits().is_empty());

    wizard.advance().unwrap();
    assert_eq!(wizard.step(), WizardStep::GetClaims);
    assert_eq!(wizard.traits().len(), 4);

    wizard.claims = parse_claims("Violence|low|Avoids violence").unwrap();
    wizard.advance().unwrap();
    assert!(wizard.comparisons().is_empty());

    wizard.advance().unwrap();
    assert_eq!(wizard.step(), WizardStep::FinalDecision);
    assert_eq!(wizard.comparisons().len(), 1);
    assert!(wizard.comparisons()[0].supported);
    assert!(wizard.result().is_none());
}

#[tokio::test]
async fn test_back_then_forward_recomputes() {
    let mut wizard = AnalysisWizard::new(six_word_analyzer());
    wizard.novel_text = "He decided to attack the guard.".to_string();
    wizard.character_name = "Marcus".to_string();
    wizard.claims = default_claims();

    advance_to(&mut wizard, WizardStep::FinalDecision);
    assert_eq!(wizard.comparisons().len(), 4);

    assert!(wizard.back());
    assert!(wizard.back());
    assert_eq!(wizard.step(), WizardStep::GetClaims);
    wizard.claims.truncate(1);

    advance_to(&mut wizard, WizardStep::Explain);
    assert_eq!(wizard.finished_result().unwrap().comparisons.len(), 1);
}

#[tokio::test]
async fn test_going_back_drops_the_finished_result() {
    let mut wizard = AnalysisWizard::new(six_word_analyzer());
    wizard.novel_text = "He decided to attack the guard.".to_string();
    wizard.character_name = "Marcus".to_string();
    wizard.claims = default_claims();

    advance_to(&mut wizard, WizardStep::Explain);
    assert!(wizard.is_finished());

    assert!(wizard.back());
    assert_eq!(wizard.step(), WizardStep::FinalDecision);
    assert!(wizard.result().is_none());
    assert!(!wizard.is_finished());

    while wizard.back() {}
    assert_eq!(wizard.step(), WizardStep::StoreStory);
    wizard.novel_text = "Nothing happened.".to_string();
    wizard.advance().unwrap();

    assert!(wizard.result().is_none());
    assert_eq!(wizard.finished_result().unwrap_err(), WizardError::NoResult(2));
    assert_eq!(wizard.chunks()[0].text, "Nothing happened.");

    advance_to(&mut wizard, WizardStep::Explain);
    let result = wizard.finished_result().unwrap();
    assert_eq!(result.chunks[0].text, "Nothing happened.");
    assert_eq!(result.actions, wizard.actions());
}

#[tokio::test]
async fn test_claims_edited_after_compare_do_not_leak_into_result() {
    let mut wizard = AnalysisWizard::new(six_word_analyzer());
    wizard.novel_text = "He decided to attack the guard.".to_string();
    wizard.character_name = "Marcus".to_string();
    wizard.claims = parse_claims("Violence|low|Avoids violence").unwrap();

    advance_to(&mut wizard, WizardStep::FinalDecision);
    let shown = wizard.comparisons().to_vec();
    wizard.claims = default_claims();

    wizard.advance().unwrap();
    let result = wizard.finished_result().unwrap();
    assert_eq!(result.comparisons, shown);
    assert_eq!(result.claims.len(), 1);
    assert_eq!(result.claims[0].text, "Avoids violence");
    assert_eq!(result.contradiction_count, 0);
}

#[tokio::test]
async fn test_save_report_after_finishing() {
    let mut wizard = AnalysisWizard::with_sample(six_word_analyzer());
    assert!(matches!(wizard.finished_result(), Err(WizardError::NoResult(1))));

    advance_to(&mut wizard, WizardStep::Explain);
    assert_eq!(wizard.advance(), Err(WizardError::AlreadyFinished));

    let dir = std::env::temp_dir().join(format!("plotiq-wizard-{}", uuid::Uuid::new_v4()));
    let path = write_report(wizard.finished_result().unwrap(), &dir)
        .await
        .unwrap();
    assert!(path.ends_with("Marcus-analysis-report.txt"));

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}
