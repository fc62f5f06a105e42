//! Header-substring heuristics assigning roles to table columns.

/// A role a column can play in the films analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Rank,
    Peak,
    Title,
    Year,
    Gross,
}

impl ColumnRole {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::Peak => "peak",
            Self::Title => "title",
            Self::Year => "year",
            Self::Gross => "gross",
        }
    }

    fn needles(self) -> &'static [&'static str] {
        match self {
            Self::Rank => &["rank"],
            Self::Peak => &["peak"],
            Self::Title => &["title", "film"],
            Self::Year => &["year"],
            Self::Gross => &["gross", "worldwide", "total"],
        }
    }
}

/// Column index per role; the first matching header wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub rank: Option<usize>,
    pub peak: Option<usize>,
    pub title: Option<usize>,
    pub year: Option<usize>,
    pub gross: Option<usize>,
}

fn find_column(lowered: &[String], role: ColumnRole) -> Option<usize> {
    lowered
        .iter()
        .position(|header| role.needles().iter().any(|needle| header.contains(needle)))
}

impl ColumnRoles {
    /// Classifies `headers` by lowercase substring.
    ///
    /// Without a title-like header the second column is taken as the title.
    pub fn classify(headers: &[String]) -> Self {
        let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

        let title = find_column(&lowered, ColumnRole::Title)
            .or_else(|| (headers.len() > 1).then_some(1));

        Self {
            rank: find_column(&lowered, ColumnRole::Rank),
            peak: find_column(&lowered, ColumnRole::Peak),
            title,
            year: find_column(&lowered, ColumnRole::Year),
            gross: find_column(&lowered, ColumnRole::Gross),
        }
    }

    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Rank => self.rank,
            ColumnRole::Peak => self.peak,
            ColumnRole::Title => self.title,
            ColumnRole::Year => self.year,
            ColumnRole::Gross => self.gross,
        }
    }

    /// Names of the `roles` that have no column.
    pub fn missing(&self, roles: &[ColumnRole]) -> Vec<String> {
        roles
            .iter()
            .filter(|role| self.get(**role).is_none())
            .map(|role| role.name().to_string())
            .collect()
    }
}
