use crate::domain::Field;

/// What the screen should do after the user pressed the return key on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusAction {
    Focus(Field),
    Submit,
}

/// Ordered focus handles plus a cursor.
#[derive(Debug, Clone)]
pub struct FocusChain {
    order: &'static [Field],
    cursor: Option<usize>,
}

impl Default for FocusChain {
    fn default() -> Self {
        Self::new(&Field::ALL)
    }
}

impl FocusChain {
    pub fn new(order: &'static [Field]) -> Self {
        Self { order, cursor: None }
    }

    pub fn focused(&self) -> Option<Field> {
        self.cursor.and_then(|index| self.order.get(index).copied())
    }

    /// Moves focus to `field`. Fields outside the chain clear the focus.
    pub fn focus(&mut self, field: Field) {
        self.cursor = self.order.iter().position(|f| *f == field);
    }

    pub fn clear(&mut self) {
        self.cursor = None;
    }

    /// Resolves the return key on `field`: the next field, or `Submit` on the last one.
    ///
    /// A field outside the chain restarts it from the first field. Only the
    /// last field submits.
    pub fn next(&mut self, field: Field) -> FocusAction {
        let Some(index) = self.order.iter().position(|f| *f == field) else {
            return match self.order.first() {
                Some(first) => {
                    self.cursor = Some(0);
                    FocusAction::Focus(*first)
                }
                None => {
                    self.cursor = None;
                    FocusAction::Focus(field)
                }
            };
        };

        if index + 1 >= self.order.len() {
            self.cursor = Some(index);
            return FocusAction::Submit;
        }

        self.cursor = Some(index + 1);
        FocusAction::Focus(self.order[index + 1])
    }
}
