use lazy_static::lazy_static;
use thiserror::Error;

/// Highest cycle day the built-in catalog assigns to a phase.
pub const COVERED_DAYS: u32 = 28;

/// One phase of the cycle and the guidance text shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseRecord {
    pub name: &'static str,
    /// 1-based cycle days belonging to this phase, ascending.
    pub days: Vec<u32>,
    pub hormonal_landscape: &'static str,
    pub behavior_insight: &'static str,
    /// Display order is meaningful.
    pub strategies: Vec<&'static str>,
}

impl PhaseRecord {
    pub fn covers(&self, day: u32) -> bool {
        self.days.contains(&day)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no phases")]
    Empty,
    #[error("no phase covers cycle day {day}")]
    UncoveredDay { day: u32 },
}

/// Ordered, immutable phase list. Built once at startup and only ever read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseCatalog {
    phases: Vec<PhaseRecord>,
}

impl PhaseCatalog {
    /// Builds a catalog from an ordered phase list. Days 1..=28 must all be
    /// assigned to some phase; days above that range may stay unassigned and
    /// resolve through the first-phase fallback.
    pub fn new(phases: Vec<PhaseRecord>) -> Result<Self, CatalogError> {
        if phases.is_empty() {
            return Err(CatalogError::Empty);
        }
        for day in 1..=COVERED_DAYS {
            if !phases.iter().any(|phase| phase.covers(day)) {
                return Err(CatalogError::UncoveredDay { day });
            }
        }
        Ok(Self { phases })
    }

    /// The built-in four-phase career catalog.
    pub fn career_default() -> Result<Self, CatalogError> {
        Self::new(CAREER_PHASES.clone())
    }

    pub fn phases(&self) -> &[PhaseRecord] {
        &self.phases
    }

    pub fn first(&self) -> &PhaseRecord {
        &self.phases[0]
    }
}

lazy_static! {
    static ref CAREER_PHASES: Vec<PhaseRecord> = vec![
        PhaseRecord {
            name: "Menstruation",
            days: (1..=5).collect(),
            hormonal_landscape: "Low estrogen and progesterone",
            behavior_insight: "Lower energy, increased introspection, reduced cognitive flexibility",
            strategies: vec![
                "Prioritize low-stimulation, solo tasks like admin work, planning, or deep focus writing",
                "Reflect on recent achievements and set intentions for the cycle ahead",
                "Be gentle with energy output; consider blocking calendar time for rest or reduced workload",
                "Use journaling or voice memos to track pain, fatigue, or mood patterns",
            ],
        },
        PhaseRecord {
            name: "Follicular",
            days: (6..=13).collect(),
            hormonal_landscape: "Rising estrogen, low progesterone",
            behavior_insight: "Increased dopamine activity, improved motivation, verbal fluency, and creativity",
            strategies: vec![
                "Schedule brainstorming sessions, innovation meetings, and ambitious planning",
                "Tackle complex problem-solving and new project launches",
                "Take initiative on proposals, applications, and public speaking",
                "Learn new skills or tools; cognitive flexibility is high",
            ],
        },
        PhaseRecord {
            name: "Ovulation",
            days: vec![14, 15, 16],
            hormonal_landscape: "Peak estrogen, LH surge, slight progesterone increase",
            behavior_insight: "High verbal ability, social acuity, and confidence",
            strategies: vec![
                "Lead presentations, pitch ideas, network actively",
                "Organize team-building or client engagement activities",
                "Practice negotiation or interview skills—your communication is sharp",
                "Delegate or collaborate on shared goals; this is a peak energy window",
            ],
        },
        PhaseRecord {
            name: "Luteal",
            days: (17..=28).collect(),
            hormonal_landscape: "High progesterone, moderate estrogen",
            behavior_insight: "Increased attention to detail, sensitivity, and emotional depth. PMS symptoms may arise",
            strategies: vec![
                "Shift focus to execution, editing, and quality control",
                "Review contracts, budgets, and project deliverables",
                "Build in flexibility and buffer time as physical symptoms may increase",
                "Practice self-compassion; reduce meetings or confrontation-heavy tasks in late luteal days",
            ],
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_validates() {
        let catalog = PhaseCatalog::career_default().unwrap();
        assert_eq!(catalog.phases().len(), 4);
        let names: Vec<&str> = catalog.phases().iter().map(|p| p.name).collect();
        assert_eq!(names, ["Menstruation", "Follicular", "Ovulation", "Luteal"]);
    }

    #[test]
    fn test_default_catalog_covers_all_days() {
        let catalog = PhaseCatalog::career_default().unwrap();
        for day in 1..=COVERED_DAYS {
            let covering: Vec<&str> = catalog
                .phases()
                .iter()
                .filter(|p| p.covers(day))
                .map(|p| p.name)
                .collect();
            assert_eq!(covering.len(), 1, "day {} covered by {:?}", day, covering);
        }
    }

    #[test]
    fn test_ovulation_window() {
        let catalog = PhaseCatalog::career_default().unwrap();
        let ovulation = &catalog.phases()[2];
        assert_eq!(ovulation.name, "Ovulation");
        assert_eq!(ovulation.days, [14, 15, 16]);
        assert_eq!(ovulation.strategies.len(), 4);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(PhaseCatalog::new(vec![]).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn test_gapped_catalog_rejected() {
        let short = PhaseRecord {
            name: "Short",
            days: (1..=10).collect(),
            hormonal_landscape: "n/a",
            behavior_insight: "n/a",
            strategies: vec![],
        };
        let err = PhaseCatalog::new(vec![short]).unwrap_err();
        assert_eq!(err, CatalogError::UncoveredDay { day: 11 });
    }
}
