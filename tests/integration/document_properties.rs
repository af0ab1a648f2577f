//! Property tests for structural survey operations
//!
//! Generates arbitrary well-formed surveys and checks the identities the
//! editor relies on for undo and copy.

use proptest::prelude::*;
use proptest::sample::Index;
use survey_editor::model::IdGenerator;
use survey_editor::{AnswerOption, Block, BlockId, Intent, Question, Survey, SurveyStore};

#[derive(Debug, Clone)]
struct BlockPlan {
    /// Option count of each question
    questions: Vec<usize>,
    subblocks: Vec<BlockPlan>,
}

fn block_plan() -> impl Strategy<Value = BlockPlan> {
    let leaf = prop::collection::vec(0..4usize, 0..3).prop_map(|questions| BlockPlan {
        questions,
        subblocks: Vec::new(),
    });
    leaf.prop_recursive(3, 16, 3, |inner| {
        (
            prop::collection::vec(0..4usize, 0..3),
            prop::collection::vec(inner, 0..3),
        )
            .prop_map(|(questions, subblocks)| BlockPlan {
                questions,
                subblocks,
            })
    })
}

fn build_block(plan: &BlockPlan, ids: &mut IdGenerator) -> Block {
    let mut block = Block::new(ids.block_id());
    for (n, option_count) in plan.questions.iter().enumerate() {
        let mut question = Question::new(ids.question_id(), format!("Question {n}"));
        for m in 0..*option_count {
            question
                .options
                .push(AnswerOption::new(ids.option_id(), format!("Option {m}")));
        }
        block.questions.push(question);
    }
    for sub in &plan.subblocks {
        block.subblocks.push(build_block(sub, ids));
    }
    block
}

fn survey_strategy() -> impl Strategy<Value = Survey> {
    prop::collection::vec(block_plan(), 0..4).prop_map(|plans| {
        let mut ids = IdGenerator::new();
        let mut survey = Survey::new();
        for plan in &plans {
            survey.blocks.push(build_block(plan, &mut ids));
        }
        survey
    })
}

fn fresh_ids(survey: &Survey) -> IdGenerator {
    let mut ids = IdGenerator::new();
    ids.observe(survey);
    ids
}

fn pick_block(survey: &Survey, index: &Index) -> Option<BlockId> {
    let blocks = survey.blocks_preorder();
    if blocks.is_empty() {
        return None;
    }
    Some(blocks[index.index(blocks.len())].id.clone())
}

proptest! {
    #[test]
    fn prop_generated_surveys_are_valid(survey in survey_strategy()) {
        prop_assert!(survey.validate().is_ok());
    }

    #[test]
    fn prop_add_then_remove_block_is_identity(
        survey in survey_strategy(),
        index in any::<Index>(),
        nested in any::<bool>(),
    ) {
        let parent = if nested { pick_block(&survey, &index) } else { None };
        let id = fresh_ids(&survey).block_id();

        let added = survey.add_block(Block::new(id.clone()), parent.as_ref()).unwrap();
        prop_assert!(added.block(&id).is_ok());
        prop_assert_eq!(
            added.parent_of_block(&id).unwrap().map(|b| b.id.clone()),
            parent
        );
        prop_assert_eq!(added.remove_block(&id).unwrap(), survey);
    }

    #[test]
    fn prop_add_then_remove_question_is_identity(
        survey in survey_strategy(),
        index in any::<Index>(),
    ) {
        let Some(block_id) = pick_block(&survey, &index) else {
            return Ok(());
        };
        let question = Question::new(fresh_ids(&survey).question_id(), "Added");
        let question_id = question.id.clone();

        let added = survey.add_question(question, &block_id).unwrap();
        prop_assert_eq!(&added.block_of_question(&question_id).unwrap().id, &block_id);
        prop_assert_eq!(added.remove_question(&question_id).unwrap(), survey);
    }

    #[test]
    fn prop_duplicated_block_keeps_ids_unique(
        survey in survey_strategy(),
        index in any::<Index>(),
    ) {
        let Some(block_id) = pick_block(&survey, &index) else {
            return Ok(());
        };
        let mut ids = fresh_ids(&survey);
        let original = survey.block(&block_id).unwrap();
        let copy = original.duplicate(&mut ids);

        let next = survey.insert_block_after(copy.clone(), &block_id).unwrap();
        prop_assert!(next.validate().is_ok());
        prop_assert_eq!(
            next.all_ids().len(),
            survey.all_ids().len() + subtree_size(original)
        );
        prop_assert_eq!(
            next.parent_of_block(&copy.id).unwrap().map(|b| b.id.clone()),
            survey.parent_of_block(&block_id).unwrap().map(|b| b.id.clone())
        );
    }

    #[test]
    fn prop_lookups_agree_with_tree(survey in survey_strategy()) {
        for block in survey.blocks_preorder() {
            for question in &block.questions {
                prop_assert_eq!(&survey.block_of_question(&question.id).unwrap().id, &block.id);
                for option in &question.options {
                    prop_assert_eq!(&survey.question_of_option(&option.id).unwrap().id, &question.id);
                }
            }
            for sub in &block.subblocks {
                prop_assert_eq!(
                    survey.parent_of_block(&sub.id).unwrap().map(|b| b.id.clone()),
                    Some(block.id.clone())
                );
            }
        }
    }

    #[test]
    fn prop_undo_unwinds_every_recorded_edit(
        survey in survey_strategy(),
        targets in prop::collection::vec(prop::option::of(any::<Index>()), 1..8),
    ) {
        let mut store = SurveyStore::in_memory();
        store.dispatch(Intent::LoadSurvey { data: survey.to_json() }).unwrap();
        let start = store.survey().clone();
        let history = store.history_len();

        for target in &targets {
            let target_id = target.as_ref().and_then(|i| pick_block(store.survey(), i));
            store.dispatch(Intent::BlockDropped { target_id }).unwrap();
        }
        prop_assert_eq!(store.history_len(), history + targets.len());
        prop_assert!(store.survey().validate().is_ok());

        for _ in &targets {
            store.dispatch(Intent::UndoSurvey).unwrap();
        }
        prop_assert_eq!(store.survey(), &start);
    }
}

fn subtree_size(block: &Block) -> usize {
    1 + block
        .questions
        .iter()
        .map(|q| 1 + q.options.len())
        .sum::<usize>()
        + block.subblocks.iter().map(subtree_size).sum::<usize>()
}
