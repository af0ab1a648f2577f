//! Integration tests for editing a survey through intents
//!
//! Drives the store the way the editor view does and checks the document,
//! the undo history and the derived lookups after each step.

use super::common::fixtures::{option_added, question_dropped, sample_survey};
use survey_editor::model::SurveyIndex;
use survey_editor::{AlertLevel, BlockId, Intent, ItemType, QuestionId, StoreError, SurveyStore};

fn store_with_sample() -> SurveyStore {
    let mut store = SurveyStore::in_memory();
    store.dispatch(Intent::Load).unwrap();
    store
        .dispatch(Intent::LoadSurvey {
            data: sample_survey().to_json(),
        })
        .unwrap();
    store
}

#[test]
fn test_loaded_sample_matches_fixture() {
    let store = store_with_sample();
    assert_eq!(store.survey().blocks, sample_survey().blocks);
    assert_eq!(
        store.block_id_of_question(&QuestionId::from("q_6")).unwrap(),
        BlockId::from("b_5")
    );
}

#[test]
fn test_build_survey_from_scratch_and_unwind() {
    let mut store = SurveyStore::in_memory();
    store.dispatch(Intent::Load).unwrap();
    let empty = store.survey().clone();

    store
        .dispatch(Intent::BlockDropped { target_id: None })
        .unwrap();
    let block = store.survey().blocks[0].id.clone();
    store
        .dispatch(question_dropped(&block, "Favourite colour?"))
        .unwrap();
    let question = store.survey().blocks[0].questions[0].id.clone();
    for colour in ["Red", "Green", "Blue"] {
        store.dispatch(option_added(&question, colour)).unwrap();
    }

    let texts: Vec<_> = store
        .survey()
        .question(&question)
        .unwrap()
        .options
        .iter()
        .map(|o| o.text.as_str())
        .collect();
    assert_eq!(texts, vec!["Red", "Green", "Blue"]);
    assert_eq!(store.option_suggestions(), ["Red", "Green", "Blue"]);

    // Three options, one question, one block
    for _ in 0..5 {
        store.dispatch(Intent::UndoSurvey).unwrap();
    }
    assert_eq!(store.survey(), &empty);
}

#[test]
fn test_copy_block_keeps_document_valid() {
    let mut store = store_with_sample();

    store
        .dispatch(Intent::ItemCopy {
            item_type: ItemType::Block.into(),
            item_id: "b_1".to_string(),
        })
        .unwrap();

    let survey = store.survey();
    survey.validate().unwrap();
    let top: Vec<_> = survey.blocks.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(top.len(), 3);
    assert_eq!(top[0], "b_1");
    assert_eq!(top[2], "b_7");

    let copy = &survey.blocks[1];
    assert_eq!(copy.questions[0].text, "How old are you?");
    assert_eq!(copy.questions[0].options.len(), 2);
    assert_eq!(copy.subblocks[0].questions[0].text, "Where do you live?");

    // Editing the copy leaves the original alone
    let copied_question = copy.questions[0].id.clone();
    store
        .dispatch(Intent::SaveEditText {
            text: "Age?".to_string(),
            question_id: copied_question,
        })
        .unwrap();
    assert_eq!(
        store.survey().question(&QuestionId::from("q_2")).unwrap().text,
        "How old are you?"
    );
}

#[test]
fn test_move_question_then_undo() {
    let mut store = store_with_sample();
    let before = store.survey().clone();
    let question = QuestionId::from("q_6");

    store
        .dispatch(Intent::MoveQuestion {
            question_id: question.clone(),
            block_id: BlockId::from("b_7"),
        })
        .unwrap();
    assert_eq!(
        store.block_id_of_question(&question).unwrap(),
        BlockId::from("b_7")
    );

    store.dispatch(Intent::UndoSurvey).unwrap();
    assert_eq!(store.survey(), &before);
}

#[test]
fn test_delete_block_drops_nested_items() {
    let mut store = store_with_sample();

    store
        .dispatch(Intent::ItemDelete {
            item_type: ItemType::Block.into(),
            item_id: "b_1".to_string(),
        })
        .unwrap();

    let survey = store.survey();
    assert_eq!(survey.all_ids(), vec!["b_7"]);
    for id in ["q_2", "q_6"] {
        assert!(survey.question(&QuestionId::from(id)).is_err());
    }
    assert!(survey.block(&BlockId::from("b_5")).is_err());
}

#[test]
fn test_stale_ids_are_reported_not_applied() {
    let mut store = store_with_sample();
    store
        .dispatch(Intent::ItemDelete {
            item_type: ItemType::Question.into(),
            item_id: "q_2".to_string(),
        })
        .unwrap();
    let before = store.survey().clone();
    let history = store.history_len();

    let err = store.dispatch(option_added(&QuestionId::from("q_2"), "Late")).unwrap_err();

    assert!(matches!(err, StoreError::NotFound { kind: "question", .. }));
    assert_eq!(store.survey(), &before);
    assert_eq!(store.history_len(), history);
    assert_eq!(store.state().alert.level, AlertLevel::Warning);
    assert!(store.state().alert.message.contains("q_2"));
}

#[test]
fn test_index_tracks_edits() {
    let mut store = store_with_sample();
    store
        .dispatch(Intent::BlockDropped {
            target_id: Some(BlockId::from("b_7")),
        })
        .unwrap();
    store
        .dispatch(Intent::MoveQuestion {
            question_id: QuestionId::from("q_2"),
            block_id: BlockId::from("b_7"),
        })
        .unwrap();

    let survey = store.survey();
    let index = SurveyIndex::build(survey);
    for question in survey.questions() {
        assert_eq!(
            index.block_of(&question.id),
            Some(&survey.block_of_question(&question.id).unwrap().id)
        );
        for option in &question.options {
            assert_eq!(index.question_of(&option.id), Some(&question.id));
        }
    }
    for block in survey.blocks_preorder() {
        let parent = survey.parent_of_block(&block.id).unwrap().map(|b| &b.id);
        assert_eq!(index.parent_of(&block.id), parent);
    }
}
