//! Static drop rules.

use super::payload::PayloadKind;
use serde::{Deserialize, Serialize};

/// Kinds of drop target known to the interaction core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// The capture surface; accepts collections to open them
    CaptureSurface,
    /// An open magazine; accepts pages
    Magazine,
    /// The composition canvas
    Canvas,
    /// The control that moves a held cutout to the composition surface
    TransitionTarget,
}

impl TargetKind {
    pub const ALL: [TargetKind; 4] = [
        TargetKind::CaptureSurface,
        TargetKind::Magazine,
        TargetKind::Canvas,
        TargetKind::TransitionTarget,
    ];
}

/// Mapping from drop-target kind to the payload kinds it accepts.
pub struct DropRule;

impl DropRule {
    /// Payload kinds accepted by `target`
    pub fn accepted(target: TargetKind) -> &'static [PayloadKind] {
        match target {
            TargetKind::CaptureSurface => &[PayloadKind::Collection],
            TargetKind::Magazine => &[PayloadKind::Page],
            TargetKind::Canvas => &[PayloadKind::Page, PayloadKind::Cutout],
            TargetKind::TransitionTarget => &[PayloadKind::Cutout],
        }
    }

    #[inline]
    pub fn accepts(target: TargetKind, kind: PayloadKind) -> bool {
        Self::accepted(target).contains(&kind)
    }
}
