//! Read-only traversal of a survey.
//!
//! All lookups walk the tree in pre-order (a block, then its questions, then
//! its subblocks) and return the first match, so a document that somehow
//! carries a duplicate id still resolves deterministically.

use std::collections::{HashMap, HashSet};

use super::ids::{BlockId, ItemType, OptionId, QuestionId};
use super::survey::{AnswerOption, Block, Question, Survey};
use super::ModelError;

impl Survey {
    /// Find a block anywhere in the tree.
    pub fn block(&self, id: &BlockId) -> Result<&Block, ModelError> {
        find_block(&self.blocks, id).ok_or_else(|| ModelError::not_found(ItemType::Block, id))
    }

    /// Find a question anywhere in the tree.
    pub fn question(&self, id: &QuestionId) -> Result<&Question, ModelError> {
        find_question(&self.blocks, id)
            .map(|(_, q)| q)
            .ok_or_else(|| ModelError::not_found(ItemType::Question, id))
    }

    /// Find an option anywhere in the tree.
    pub fn option(&self, id: &OptionId) -> Result<&AnswerOption, ModelError> {
        find_option(&self.blocks, id)
            .map(|(_, o)| o)
            .ok_or_else(|| ModelError::not_found(ItemType::Option, id))
    }

    /// The block owning a question.
    pub fn block_of_question(&self, id: &QuestionId) -> Result<&Block, ModelError> {
        find_question(&self.blocks, id)
            .map(|(b, _)| b)
            .ok_or_else(|| ModelError::not_found(ItemType::Question, id))
    }

    /// The question owning an option.
    pub fn question_of_option(&self, id: &OptionId) -> Result<&Question, ModelError> {
        find_option(&self.blocks, id)
            .map(|(q, _)| q)
            .ok_or_else(|| ModelError::not_found(ItemType::Option, id))
    }

    /// The parent of a block, `None` for top-level blocks.
    pub fn parent_of_block(&self, id: &BlockId) -> Result<Option<&Block>, ModelError> {
        if self.blocks.iter().any(|b| b.id == *id) {
            return Ok(None);
        }
        find_parent(&self.blocks, id)
            .map(Some)
            .ok_or_else(|| ModelError::not_found(ItemType::Block, id))
    }

    /// Every block in pre-order.
    pub fn blocks_preorder(&self) -> Vec<&Block> {
        let mut out = Vec::new();
        collect_blocks(&self.blocks, &mut out);
        out
    }

    /// Every question in pre-order.
    pub fn questions(&self) -> Vec<&Question> {
        self.blocks_preorder()
            .into_iter()
            .flat_map(|b| b.questions.iter())
            .collect()
    }

    /// Every node id in pre-order, duplicates included.
    pub fn all_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for block in self.blocks_preorder() {
            ids.push(block.id.as_str());
            for question in &block.questions {
                ids.push(question.id.as_str());
                ids.extend(question.options.iter().map(|o| o.id.as_str()));
            }
        }
        ids
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.all_ids().contains(&id)
    }

    /// Reject documents whose node ids are not unique.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        for id in self.all_ids() {
            if !seen.insert(id) {
                return Err(ModelError::DuplicateId(id.to_string()));
            }
        }
        Ok(())
    }

    pub fn index(&self) -> SurveyIndex {
        SurveyIndex::build(self)
    }
}

pub(crate) fn find_block<'a>(blocks: &'a [Block], id: &BlockId) -> Option<&'a Block> {
    for block in blocks {
        if block.id == *id {
            return Some(block);
        }
        if let Some(found) = find_block(&block.subblocks, id) {
            return Some(found);
        }
    }
    None
}

fn find_parent<'a>(blocks: &'a [Block], id: &BlockId) -> Option<&'a Block> {
    for block in blocks {
        if block.subblocks.iter().any(|b| b.id == *id) {
            return Some(block);
        }
        if let Some(found) = find_parent(&block.subblocks, id) {
            return Some(found);
        }
    }
    None
}

fn find_question<'a>(blocks: &'a [Block], id: &QuestionId) -> Option<(&'a Block, &'a Question)> {
    for block in blocks {
        if let Some(q) = block.questions.iter().find(|q| q.id == *id) {
            return Some((block, q));
        }
        if let Some(found) = find_question(&block.subblocks, id) {
            return Some(found);
        }
    }
    None
}

fn find_option<'a>(
    blocks: &'a [Block],
    id: &OptionId,
) -> Option<(&'a Question, &'a AnswerOption)> {
    for block in blocks {
        for question in &block.questions {
            if let Some(o) = question.options.iter().find(|o| o.id == *id) {
                return Some((question, o));
            }
        }
        if let Some(found) = find_option(&block.subblocks, id) {
            return Some(found);
        }
    }
    None
}

fn collect_blocks<'a>(blocks: &'a [Block], out: &mut Vec<&'a Block>) {
    for block in blocks {
        out.push(block);
        collect_blocks(&block.subblocks, out);
    }
}

/// Parent relations computed from a survey value.
///
/// This is an ephemeral structure: rebuild it after every mutation rather
/// than keeping back pointers inside the tree.
#[derive(Debug, Clone, Default)]
pub struct SurveyIndex {
    /// Block id to parent block id (`None` for top-level blocks)
    pub block_parents: HashMap<BlockId, Option<BlockId>>,
    /// Question id to owning block id
    pub question_blocks: HashMap<QuestionId, BlockId>,
    /// Option id to owning question id
    pub option_questions: HashMap<OptionId, QuestionId>,
}

impl SurveyIndex {
    pub fn build(survey: &Survey) -> Self {
        let mut index = Self::default();
        index.visit(&survey.blocks, None);
        index
    }

    fn visit(&mut self, blocks: &[Block], parent: Option<&BlockId>) {
        for block in blocks {
            // First occurrence wins, matching the pre-order lookups
            self.block_parents
                .entry(block.id.clone())
                .or_insert_with(|| parent.cloned());
            for question in &block.questions {
                self.question_blocks
                    .entry(question.id.clone())
                    .or_insert_with(|| block.id.clone());
                for option in &question.options {
                    self.option_questions
                        .entry(option.id.clone())
                        .or_insert_with(|| question.id.clone());
                }
            }
            self.visit(&block.subblocks, Some(&block.id));
        }
    }

    pub fn parent_of(&self, id: &BlockId) -> Option<&BlockId> {
        self.block_parents.get(id).and_then(|p| p.as_ref())
    }

    pub fn block_of(&self, id: &QuestionId) -> Option<&BlockId> {
        self.question_blocks.get(id)
    }

    pub fn question_of(&self, id: &OptionId) -> Option<&QuestionId> {
        self.option_questions.get(id)
    }
}
