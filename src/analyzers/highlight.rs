use crate::analyzers::types::Totaled;

/// Marks the row with the largest `total_customers` in an aggregate table.
///
/// Ties go to the first row in table order, which for every aggregate is the
/// ascending order of its grouping key. An empty table highlights nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Highlight {
    index: Option<usize>,
}

impl Highlight {
    pub fn select<T: Totaled>(rows: &[T]) -> Self {
        let mut best: Option<(usize, u64)> = None;

        for (i, row) in rows.iter().enumerate() {
            let total = row.total_customers();
            match best {
                Some((_, max)) if total <= max => {}
                _ => best = Some((i, total)),
            }
        }

        Highlight {
            index: best.map(|(i, _)| i),
        }
    }

    /// Index of the highlighted row, if the table was non-empty.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.index == Some(index)
    }
}
