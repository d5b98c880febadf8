// Exclusive toggle group - one visible panel out of N
//
// Used three times with no shared state: login/signup forms, chat/study
// interfaces and the study wizard steps.
//
// A transition is two ordered steps so the renderer can cross-fade:
//
//   1. old panel: Active  → Previous   (flagged first)
//   2. new panel: Previous/Hidden → Active
//
// At most one member is Active at any time. The group never validates
// anything; callers decide whether a transition is allowed before asking.

use crate::error::PageError;
use std::fmt::Debug;

/// Visual state of one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelMark {
    #[default]
    Hidden,
    Active,
    /// Was active until the last transition
    Previous,
}

/// Record of a completed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<P> {
    pub from: Option<P>,
    pub to: P,
}

/// Mutually exclusive set of named panels
#[derive(Debug, Clone)]
pub struct ExclusiveToggleGroup<P> {
    name: &'static str,
    members: Vec<(P, PanelMark)>,
    active: Option<P>,
    transitions: u64,
}

impl<P: Copy + Eq + Debug> ExclusiveToggleGroup<P> {
    /// Build a group with nothing active yet
    pub fn new(name: &'static str, members: impl IntoIterator<Item = P>) -> Result<Self, PageError> {
        let mut list: Vec<(P, PanelMark)> = Vec::new();
        for member in members {
            if list.iter().any(|(p, _)| *p == member) {
                return Err(PageError::missing(
                    name,
                    format!("panel {:?} listed twice", member),
                ));
            }
            list.push((member, PanelMark::Hidden));
        }

        if list.is_empty() {
            return Err(PageError::missing(name, "no panels"));
        }

        Ok(Self {
            name,
            members: list,
            active: None,
            transitions: 0,
        })
    }

    /// Build a group with `default` active before any interaction
    pub fn with_default(
        name: &'static str,
        members: impl IntoIterator<Item = P>,
        default: P,
    ) -> Result<Self, PageError> {
        let mut group = Self::new(name, members)?;
        let Some(slot) = group.members.iter_mut().find(|(p, _)| *p == default) else {
            return Err(PageError::missing(
                name,
                format!("default panel {:?} is not a member", default),
            ));
        };
        slot.1 = PanelMark::Active;
        group.active = Some(default);
        Ok(group)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Currently active panel
    pub fn active(&self) -> Option<P> {
        self.active
    }

    pub fn is_active(&self, panel: P) -> bool {
        self.active == Some(panel)
    }

    /// Mark of a panel (Hidden for non-members)
    pub fn mark(&self, panel: P) -> PanelMark {
        self.members
            .iter()
            .find(|(p, _)| *p == panel)
            .map(|(_, m)| *m)
            .unwrap_or_default()
    }

    /// Members in display order
    pub fn members(&self) -> impl Iterator<Item = P> + '_ {
        self.members.iter().map(|(p, _)| *p)
    }

    /// Number of transitions performed so far
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Show `panel`, hiding the current one
    ///
    /// Returns `Ok(None)` when `panel` is already active (no transition).
    pub fn activate(&mut self, panel: P) -> Result<Option<Transition<P>>, PageError> {
        if !self.members.iter().any(|(p, _)| *p == panel) {
            return Err(PageError::UnknownPanel {
                group: self.name,
                panel: format!("{:?}", panel),
            });
        }

        if self.active == Some(panel) {
            return Ok(None);
        }

        let from = self.active;

        // Step 1: flag the outgoing panel before anything is shown
        if let Some(old) = from {
            self.set_mark(old, PanelMark::Previous);
        }

        // Step 2: show the incoming panel
        self.set_mark(panel, PanelMark::Active);
        self.active = Some(panel);
        self.transitions += 1;

        tracing::debug!(group = self.name, ?from, to = ?panel, "panel transition");

        Ok(Some(Transition { from, to: panel }))
    }

    /// Activate the member after the active one (wraps)
    pub fn next(&mut self) -> Option<Transition<P>> {
        self.cycle(1)
    }

    /// Activate the member before the active one (wraps)
    pub fn previous(&mut self) -> Option<Transition<P>> {
        self.cycle(self.members.len() - 1)
    }

    fn cycle(&mut self, offset: usize) -> Option<Transition<P>> {
        let len = self.members.len();
        let current = self
            .active
            .and_then(|a| self.members.iter().position(|(p, _)| *p == a));
        let target = match current {
            Some(i) => self.members[(i + offset) % len].0,
            None => self.members[0].0,
        };
        // Target is always a member
        self.activate(target).ok().flatten()
    }

    fn set_mark(&mut self, panel: P, mark: PanelMark) {
        // Previous is exclusive too: only the most recent outgoing panel keeps it
        if mark == PanelMark::Previous {
            for (_, m) in self.members.iter_mut() {
                if *m == PanelMark::Previous {
                    *m = PanelMark::Hidden;
                }
            }
        }
        if let Some((_, m)) = self.members.iter_mut().find(|(p, _)| *p == panel) {
            *m = mark;
        }
    }
}
