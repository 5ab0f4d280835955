use crate::model::ForbiddenIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotOrder {
    #[default]
    Ascending,
    MostConstrained,
}

impl SlotOrder {
    pub fn name(self) -> &'static str {
        match self {
            SlotOrder::Ascending => "ascending",
            SlotOrder::MostConstrained => "most-constrained",
        }
    }

    pub(crate) fn visit(self, index: &ForbiddenIndex) -> Vec<usize> {
        let mut order = (0..index.slots()).collect::<Vec<_>>();
        if self == SlotOrder::MostConstrained {
            order.sort_by_key(|&s| (index.allowed_count(s), s));
        }
        order
    }
}
