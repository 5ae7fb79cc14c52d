/// Raw text of one CSV field.
///
/// Cells never carry an implicit number; callers that need one go through
/// [`Cell::as_number`] at the point of use.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell(String);

impl Cell {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_number(&self) -> Option<f64> {
        parse_number(&self.0)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Parses a float, ignoring surrounding whitespace.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Cell)>,
}

impl Row {
    /// Builds a row from header names and record values.
    ///
    /// Missing trailing values become empty cells and extra values are
    /// dropped. A repeated header keeps its first position but takes the
    /// later value.
    pub fn from_record<'a, H, V>(
        headers: H,
        values: V,
    ) -> Self
    where
        H: IntoIterator<Item = &'a str>,
        V: IntoIterator<Item = &'a str>,
    {
        let mut values = values.into_iter();
        let mut row = Self::default();
        for header in headers {
            let cell = Cell::new(values.next().unwrap_or_default());
            row.insert(header, cell);
        }
        row
    }

    pub fn insert(
        &mut self,
        column: &str,
        cell: Cell,
    ) {
        match self.fields.iter_mut().find(|(name, _)| name == column) {
            Some((_, existing)) => *existing = cell,
            None => self.fields.push((column.to_string(), cell)),
        }
    }

    pub fn get(
        &self,
        column: &str,
    ) -> Option<&Cell> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, cell)| cell)
    }
}
