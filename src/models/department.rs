//! Department choices offered by the edit form.

/// The fixed set of departments a student can be assigned to.
///
/// The record itself stores the department as a plain string, which may lie
/// outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    ComputerScience,
    ElectricalEngineering,
    MechanicalEngineering,
    CivilEngineering,
    DataScience,
    BusinessAdministration,
}

impl Department {
    /// Every department, in the order the selector lists them.
    pub const ALL: [Department; 6] = [
        Department::ComputerScience,
        Department::ElectricalEngineering,
        Department::MechanicalEngineering,
        Department::CivilEngineering,
        Department::DataScience,
        Department::BusinessAdministration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::ComputerScience => "Computer Science",
            Department::ElectricalEngineering => "Electrical Engineering",
            Department::MechanicalEngineering => "Mechanical Engineering",
            Department::CivilEngineering => "Civil Engineering",
            Department::DataScience => "Data Science",
            Department::BusinessAdministration => "Business Administration",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dept| dept.as_str() == s)
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_matches_display_names() {
        for dept in Department::ALL {
            assert_eq!(Department::from_str(dept.as_str()), Some(dept));
        }
    }

    #[test]
    fn test_unknown_department() {
        assert_eq!(Department::from_str("Astrophysics"), None);
        assert_eq!(Department::from_str("computer science"), None);
    }
}
