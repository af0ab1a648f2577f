//! Structural operations on a survey.
//!
//! Every operation takes `&self` and returns a new `Survey`; the receiver is
//! never modified, so older values stay valid for undo.

use std::collections::HashSet;

use super::ids::{BlockId, ItemType, OptionId, QuestionId};
use super::survey::{AnswerOption, Block, Question, Survey};
use super::ModelError;

impl Survey {
    /// Append a block at the top level, or under `parent` when given.
    pub fn add_block(&self, block: Block, parent: Option<&BlockId>) -> Result<Survey, ModelError> {
        self.ensure_fresh(block_ids(&block))?;
        let mut next = self.clone();
        match parent {
            None => next.blocks.push(block),
            Some(parent_id) => block_mut(&mut next.blocks, parent_id)
                .ok_or_else(|| ModelError::not_found(ItemType::Block, parent_id))?
                .subblocks
                .push(block),
        }
        Ok(next)
    }

    /// Remove a block together with everything nested under it.
    pub fn remove_block(&self, id: &BlockId) -> Result<Survey, ModelError> {
        let mut next = self.clone();
        take_block(&mut next.blocks, id).ok_or_else(|| ModelError::not_found(ItemType::Block, id))?;
        Ok(next)
    }

    /// Substitute the block with the same id, keeping its position.
    pub fn replace_block(&self, block: Block) -> Result<Survey, ModelError> {
        let mut next = self.clone();
        let slot = block_mut(&mut next.blocks, &block.id)
            .ok_or_else(|| ModelError::not_found(ItemType::Block, &block.id))?;
        *slot = block;
        Ok(next)
    }

    /// Insert a block directly after `sibling` in the sibling's sequence.
    pub fn insert_block_after(&self, block: Block, sibling: &BlockId) -> Result<Survey, ModelError> {
        self.ensure_fresh(block_ids(&block))?;
        let mut next = self.clone();
        place_block_after(&mut next.blocks, sibling, block)
            .map_err(|_| ModelError::not_found(ItemType::Block, sibling))?;
        Ok(next)
    }

    /// Append a question to a block.
    pub fn add_question(&self, question: Question, block_id: &BlockId) -> Result<Survey, ModelError> {
        self.ensure_fresh(question_ids(&question))?;
        let mut next = self.clone();
        block_mut(&mut next.blocks, block_id)
            .ok_or_else(|| ModelError::not_found(ItemType::Block, block_id))?
            .questions
            .push(question);
        Ok(next)
    }

    /// Remove a question and its options from the owning block.
    pub fn remove_question(&self, id: &QuestionId) -> Result<Survey, ModelError> {
        let mut next = self.clone();
        take_question(&mut next.blocks, id)
            .ok_or_else(|| ModelError::not_found(ItemType::Question, id))?;
        Ok(next)
    }

    /// Substitute the question with the same id, keeping its position.
    pub fn replace_question(&self, question: Question) -> Result<Survey, ModelError> {
        let mut next = self.clone();
        let slot = question_mut(&mut next.blocks, &question.id)
            .ok_or_else(|| ModelError::not_found(ItemType::Question, &question.id))?;
        *slot = question;
        Ok(next)
    }

    /// Insert a question directly after `sibling` in the same block.
    pub fn insert_question_after(
        &self,
        question: Question,
        sibling: &QuestionId,
    ) -> Result<Survey, ModelError> {
        self.ensure_fresh(question_ids(&question))?;
        let mut next = self.clone();
        let block = owning_block_mut(&mut next.blocks, sibling)
            .ok_or_else(|| ModelError::not_found(ItemType::Question, sibling))?;
        let pos = block
            .questions
            .iter()
            .position(|q| q.id == *sibling)
            .ok_or_else(|| ModelError::not_found(ItemType::Question, sibling))?;
        block.questions.insert(pos + 1, question);
        Ok(next)
    }

    /// Append an option to a question.
    pub fn add_option(
        &self,
        option: AnswerOption,
        question_id: &QuestionId,
    ) -> Result<Survey, ModelError> {
        self.ensure_fresh(std::iter::once(option.id.as_str()))?;
        let mut next = self.clone();
        question_mut(&mut next.blocks, question_id)
            .ok_or_else(|| ModelError::not_found(ItemType::Question, question_id))?
            .options
            .push(option);
        Ok(next)
    }

    /// Remove an option from its question.
    pub fn remove_option(&self, id: &OptionId) -> Result<Survey, ModelError> {
        let mut next = self.clone();
        take_option(&mut next.blocks, id).ok_or_else(|| ModelError::not_found(ItemType::Option, id))?;
        Ok(next)
    }

    fn ensure_fresh<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Result<(), ModelError> {
        let existing: HashSet<&str> = self.all_ids().into_iter().collect();
        let mut incoming = HashSet::new();
        for id in ids {
            if existing.contains(id) || !incoming.insert(id) {
                return Err(ModelError::DuplicateId(id.to_string()));
            }
        }
        Ok(())
    }
}

/// Deep value copy of a block; ids are kept.
pub fn copy_block(block: &Block) -> Block {
    block.clone()
}

/// Deep value copy of a question; ids are kept.
pub fn copy_question(question: &Question) -> Question {
    question.clone()
}

fn block_ids(block: &Block) -> Vec<&str> {
    let mut ids = vec![block.id.as_str()];
    for question in &block.questions {
        ids.extend(question_ids(question));
    }
    for sub in &block.subblocks {
        ids.extend(block_ids(sub));
    }
    ids
}

fn question_ids(question: &Question) -> Vec<&str> {
    std::iter::once(question.id.as_str())
        .chain(question.options.iter().map(|o| o.id.as_str()))
        .collect()
}

fn block_mut<'a>(blocks: &'a mut [Block], id: &BlockId) -> Option<&'a mut Block> {
    for block in blocks.iter_mut() {
        if block.id == *id {
            return Some(block);
        }
        if let Some(found) = block_mut(&mut block.subblocks, id) {
            return Some(found);
        }
    }
    None
}

fn owning_block_mut<'a>(blocks: &'a mut [Block], id: &QuestionId) -> Option<&'a mut Block> {
    for block in blocks.iter_mut() {
        if block.questions.iter().any(|q| q.id == *id) {
            return Some(block);
        }
        if let Some(found) = owning_block_mut(&mut block.subblocks, id) {
            return Some(found);
        }
    }
    None
}

fn question_mut<'a>(blocks: &'a mut [Block], id: &QuestionId) -> Option<&'a mut Question> {
    for block in blocks.iter_mut() {
        if let Some(q) = block.questions.iter_mut().find(|q| q.id == *id) {
            return Some(q);
        }
        if let Some(found) = question_mut(&mut block.subblocks, id) {
            return Some(found);
        }
    }
    None
}

fn take_block(blocks: &mut Vec<Block>, id: &BlockId) -> Option<Block> {
    for i in 0..blocks.len() {
        if blocks[i].id == *id {
            return Some(blocks.remove(i));
        }
        if let Some(found) = take_block(&mut blocks[i].subblocks, id) {
            return Some(found);
        }
    }
    None
}

fn take_question(blocks: &mut [Block], id: &QuestionId) -> Option<Question> {
    for block in blocks.iter_mut() {
        if let Some(pos) = block.questions.iter().position(|q| q.id == *id) {
            return Some(block.questions.remove(pos));
        }
        if let Some(found) = take_question(&mut block.subblocks, id) {
            return Some(found);
        }
    }
    None
}

fn take_option(blocks: &mut [Block], id: &OptionId) -> Option<AnswerOption> {
    for block in blocks.iter_mut() {
        for question in block.questions.iter_mut() {
            if let Some(pos) = question.options.iter().position(|o| o.id == *id) {
                return Some(question.options.remove(pos));
            }
        }
        if let Some(found) = take_option(&mut block.subblocks, id) {
            return Some(found);
        }
    }
    None
}

/// Hands the block back when the sibling does not exist.
fn place_block_after(blocks: &mut Vec<Block>, sibling: &BlockId, block: Block) -> Result<(), Block> {
    let mut block = block;
    for i in 0..blocks.len() {
        if blocks[i].id == *sibling {
            blocks.insert(i + 1, block);
            return Ok(());
        }
        match place_block_after(&mut blocks[i].subblocks, sibling, block) {
            Ok(()) => return Ok(()),
            Err(returned) => block = returned,
        }
    }
    Err(block)
}
