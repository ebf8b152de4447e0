use crate::models::{Item, ItemDto};

/// Converts between persisted items and their transfer shape
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemMapper;

impl ItemMapper {
    pub fn to_dto(&self, item: Item) -> ItemDto {
        ItemDto {
            id: item.id,
            name: item.name,
            is_complete: item.is_complete,
        }
    }

    pub fn to_dtos(&self, items: Vec<Item>) -> Vec<ItemDto> {
        items.into_iter().map(|item| self.to_dto(item)).collect()
    }

    /// The id is reset to 0; the store assigns the real one on save
    pub fn to_entity(&self, dto: ItemDto) -> Item {
        Item {
            id: 0,
            name: dto.name,
            is_complete: dto.is_complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_entity_discards_supplied_id() {
        let dto = ItemDto {
            id: 42,
            name: Some("Buy milk".into()),
            is_complete: false,
        };

        let item = ItemMapper.to_entity(dto);
        assert_eq!(item.id, 0);
        assert_eq!(item.name.as_deref(), Some("Buy milk"));
    }

    #[test]
    fn test_dto_entity_dto_keeps_name_and_flag() {
        for dto in [
            ItemDto {
                id: 9,
                name: Some("Walk dog".into()),
                is_complete: true,
            },
            ItemDto {
                id: 0,
                name: None,
                is_complete: false,
            },
        ] {
            let back = ItemMapper.to_dto(ItemMapper.to_entity(dto.clone()));
            assert_eq!(back.name, dto.name);
            assert_eq!(back.is_complete, dto.is_complete);
        }
    }

    #[test]
    fn test_to_dtos_preserves_order() {
        let items = vec![
            Item {
                id: 1,
                name: Some("a".into()),
                is_complete: false,
            },
            Item {
                id: 2,
                name: Some("b".into()),
                is_complete: true,
            },
        ];

        let ids: Vec<i32> = ItemMapper.to_dtos(items).iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
