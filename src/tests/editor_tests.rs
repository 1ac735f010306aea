//! Editor tests: settings-panel edits merged through the store
//!
//! Each edit produces a patch; the store merges it. These tests check that
//! a sequence of panel edits leaves exactly the intended fields changed.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::core::settings::{LikertScale, TextSettings};
    use crate::core::template::starter_blocks;
    use crate::core::{Block, BlockKind, BlockStore, BlockType};
    use crate::editor::{self, apply_edit, BlockEdit, EditError, FieldValue};

    fn store_with(blocks: Vec<Block>) -> BlockStore {
        let mut store = BlockStore::new();
        store.set_blocks(blocks);
        store
    }

    /// Run `edit` against block `id` and merge the result.
    fn edit(store: &mut BlockStore, id: &str, edit: BlockEdit) -> Result<(), EditError> {
        let block = store.get(id).expect("block exists");
        let patch = apply_edit(block, edit)?;
        assert!(store.update_block(id, &patch));
        Ok(())
    }

    /// Building a choice question from scratch: add, fill, remove.
    #[test]
    fn test_build_choice_question() {
        let block = Block::instantiate(BlockType::SingleChoice);
        let id = block.id.to_string();
        let mut store = store_with(vec![block]);

        edit(&mut store, &id, BlockEdit::Title("Favourite colour?".into())).unwrap();
        for _ in 0..3 {
            edit(&mut store, &id, BlockEdit::AddOption).unwrap();
        }
        for (index, text) in ["Red", "Green", "Blue"].into_iter().enumerate() {
            edit(&mut store, &id, BlockEdit::EditOption { index, text: text.into() }).unwrap();
        }
        edit(&mut store, &id, BlockEdit::RemoveOption { index: 0 }).unwrap();

        let block = store.get(&id).unwrap();
        assert_eq!(block.title, "Favourite colour?");
        assert_eq!(block.kind.choice().unwrap().options, ["Green", "Blue"]);
        assert_eq!(block.block_type(), BlockType::SingleChoice);
    }

    /// Editing one block leaves its neighbours as they were.
    #[test]
    fn test_edit_touches_one_block() {
        let mut store = store_with(starter_blocks());
        let before = store.snapshot();

        edit(&mut store, "frequency", BlockEdit::AddOption).unwrap();

        assert_eq!(store.blocks()[0], before.blocks()[0]);
        assert_eq!(store.blocks()[1], before.blocks()[1]);
        let options = &store.blocks()[2].kind.choice().unwrap().options;
        assert_eq!(options.len(), 6);
        assert_eq!(options[5], "");
    }

    /// Failed edits leave the store untouched.
    #[test]
    fn test_rejected_edit_commits_nothing() {
        let mut store = store_with(starter_blocks());
        let revision = store.revision();

        let result = edit(&mut store, "usage", BlockEdit::AddOption);
        assert!(matches!(result, Err(EditError::FieldNotSupported { .. })));

        let result = edit(&mut store, "frequency", BlockEdit::RemoveOption { index: 9 });
        assert!(matches!(result, Err(EditError::EntryIndexOutOfRange { .. })));

        assert_eq!(store.revision(), revision);
    }

    /// Length edits keep the other bound; min above max is allowed here.
    #[test]
    fn test_length_edits() {
        let mut store = store_with(vec![Block::new("t", BlockKind::LongText(TextSettings::default()))]);

        edit(&mut store, "t", BlockEdit::MinLength(2000)).unwrap();
        assert_eq!(
            store.get("t").unwrap().kind.text(),
            Some(&TextSettings {
                min_length: 2000,
                max_length: 1000
            })
        );

        assert!(matches!(
            edit(&mut store, "t", BlockEdit::MaxLength(0)),
            Err(EditError::BelowMinimum { min: 1, .. })
        ));
    }

    /// Likert edits arrive as JSON from the panel.
    #[test]
    fn test_likert_edits_from_json() {
        let mut store = store_with(vec![Block::new("l", BlockKind::default_for(BlockType::Likert))]);

        let edits = [
            json!({ "field": "addStatement" }),
            json!({ "field": "editStatement", "value": { "index": 0, "text": "Easy to learn" } }),
            json!({ "field": "scale", "value": 7 }),
        ];
        for value in edits {
            let parsed: BlockEdit = serde_json::from_value(value).unwrap();
            edit(&mut store, "l", parsed).unwrap();
        }

        let likert = store.get("l").unwrap().kind.likert().unwrap().clone();
        assert_eq!(likert.statements, ["Easy to learn"]);
        assert_eq!(likert.scale, LikertScale::Seven);

        let fields = editor::fields(store.get("l").unwrap());
        let scale = fields.iter().find(|f| f.id == "scale").unwrap();
        assert_eq!(scale.value, FieldValue::Integer(7));
    }

    /// Field descriptors follow the edited values.
    #[test]
    fn test_fields_reflect_edits() {
        let mut store = store_with(starter_blocks());
        edit(&mut store, "usage", BlockEdit::Required(false)).unwrap();

        let fields = editor::fields(store.get("usage").unwrap());
        let required = fields.iter().find(|f| f.id == "required").unwrap();
        assert_eq!(required.value, FieldValue::Boolean(false));
        assert_eq!(fields.first().map(|f| f.id), Some("title"));
        assert_eq!(fields.last().map(|f| f.id), Some("required"));
    }
}
