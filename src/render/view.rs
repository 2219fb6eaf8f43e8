//! View operations: the screen renderer's output protocol

use crate::model::{NumberKind, RemedyTier, RuleOutcome};
use crate::theme::Tone;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Named anchor in the live view that a section is rendered into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountPoint {
    ErrorBanner,
    Results,
    ResultName,
    ResultDob,
    DriverValue,
    ConductorValue,
    KuaValue,
    LoshuGrid,
    PresentNumbersList,
    MissingNumbers,
    MissingNumbersList,
    LoshuLines,
    LinesContainer,
    CompatNumber(NumberKind),
    Planet(NumberKind),
    Friends(NumberKind),
    NonFriends(NumberKind),
    Neutral(NumberKind),
    LuckyNumbersSummary,
    BadNumbersSummary,
    NeutralNumbersSummary,
    Remedies(RemedyTier),
    LuckFactors,
    FirstName,
    FirstNameValue,
    FirstNameBreakdown,
    FullName,
    FullNameValue,
    FullNameBreakdown,
    Rules(RuleOutcome),
}

impl MountPoint {
    /// Element id of the mount point
    pub fn id(&self) -> Cow<'static, str> {
        let prefix = |kind: &NumberKind| match kind {
            NumberKind::Driver => "driver",
            NumberKind::Conductor => "conductor",
        };
        match self {
            MountPoint::ErrorBanner => "error".into(),
            MountPoint::Results => "results".into(),
            MountPoint::ResultName => "resultName".into(),
            MountPoint::ResultDob => "resultDob".into(),
            MountPoint::DriverValue => "driverValue".into(),
            MountPoint::ConductorValue => "conductorValue".into(),
            MountPoint::KuaValue => "kuaValue".into(),
            MountPoint::LoshuGrid => "loshuGrid".into(),
            MountPoint::PresentNumbersList => "presentNumbersList".into(),
            MountPoint::MissingNumbers => "missingNumbers".into(),
            MountPoint::MissingNumbersList => "missingNumbersList".into(),
            MountPoint::LoshuLines => "loshuLines".into(),
            MountPoint::LinesContainer => "linesContainer".into(),
            MountPoint::CompatNumber(kind) => format!("{}NumCompat", prefix(kind)).into(),
            MountPoint::Planet(kind) => format!("{}Planet", prefix(kind)).into(),
            MountPoint::Friends(kind) => format!("{}Friends", prefix(kind)).into(),
            MountPoint::NonFriends(kind) => format!("{}NonFriends", prefix(kind)).into(),
            MountPoint::Neutral(kind) => format!("{}Neutral", prefix(kind)).into(),
            MountPoint::LuckyNumbersSummary => "luckyNumbersSummary".into(),
            MountPoint::BadNumbersSummary => "badNumbersSummary".into(),
            MountPoint::NeutralNumbersSummary => "neutralNumbersSummary".into(),
            MountPoint::Remedies(RemedyTier::Missing) => "remediesPart1Container".into(),
            MountPoint::Remedies(RemedyTier::Yantra) => "remediesPart2Container".into(),
            MountPoint::Remedies(RemedyTier::Planetary) => "remediesPart3Container".into(),
            MountPoint::LuckFactors => "luckFactorContainer".into(),
            MountPoint::FirstName => "firstName".into(),
            MountPoint::FirstNameValue => "firstNameValue".into(),
            MountPoint::FirstNameBreakdown => "firstNameBreakdown".into(),
            MountPoint::FullName => "fullNameDisplay".into(),
            MountPoint::FullNameValue => "fullNameValue".into(),
            MountPoint::FullNameBreakdown => "fullNameBreakdown".into(),
            MountPoint::Rules(RuleOutcome::Followed) => "followedRules".into(),
            MountPoint::Rules(RuleOutcome::Contradicted) => "contradictedRules".into(),
        }
    }

    /// Every mount point the screen expects to exist
    pub fn all() -> Vec<MountPoint> {
        let mut all = vec![
            MountPoint::ErrorBanner,
            MountPoint::Results,
            MountPoint::ResultName,
            MountPoint::ResultDob,
            MountPoint::DriverValue,
            MountPoint::ConductorValue,
            MountPoint::KuaValue,
            MountPoint::LoshuGrid,
            MountPoint::PresentNumbersList,
            MountPoint::MissingNumbers,
            MountPoint::MissingNumbersList,
            MountPoint::LoshuLines,
            MountPoint::LinesContainer,
        ];
        for kind in NumberKind::ALL {
            all.extend([
                MountPoint::CompatNumber(kind),
                MountPoint::Planet(kind),
                MountPoint::Friends(kind),
                MountPoint::NonFriends(kind),
                MountPoint::Neutral(kind),
            ]);
        }
        all.extend([
            MountPoint::LuckyNumbersSummary,
            MountPoint::BadNumbersSummary,
            MountPoint::NeutralNumbersSummary,
            MountPoint::Remedies(RemedyTier::Missing),
            MountPoint::Remedies(RemedyTier::Yantra),
            MountPoint::Remedies(RemedyTier::Planetary),
            MountPoint::LuckFactors,
            MountPoint::FirstName,
            MountPoint::FirstNameValue,
            MountPoint::FirstNameBreakdown,
            MountPoint::FullName,
            MountPoint::FullNameValue,
            MountPoint::FullNameBreakdown,
            MountPoint::Rules(RuleOutcome::Followed),
            MountPoint::Rules(RuleOutcome::Contradicted),
        ]);
        all
    }
}

impl Serialize for MountPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id())
    }
}

/// Element to be created under a mount point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewNode {
    pub tag: &'static str,
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub classes: SmallVec<[&'static str; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: SmallVec::new(),
            text: None,
            tone: None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    /// This node and all nodes below it, depth first
    pub fn descendants(&self) -> Vec<&ViewNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.descendants());
        }
        out
    }
}

/// One mutation of the live view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ViewOp {
    /// Drop everything under the mount point and insert `children`
    Replace {
        mount: MountPoint,
        children: Vec<ViewNode>,
    },
    /// Set the mount point's own text content
    SetText { mount: MountPoint, text: String },
    SetVisible { mount: MountPoint, visible: bool },
}

impl ViewOp {
    pub fn mount(&self) -> MountPoint {
        match self {
            ViewOp::Replace { mount, .. }
            | ViewOp::SetText { mount, .. }
            | ViewOp::SetVisible { mount, .. } => *mount,
        }
    }
}

/// Ordered ops produced by one projection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScreenFrame {
    pub ops: Vec<ViewOp>,
}

impl ScreenFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: ViewOp) {
        self.ops.push(op);
    }

    pub fn set_text(&mut self, mount: MountPoint, text: impl Into<String>) {
        self.ops.push(ViewOp::SetText {
            mount,
            text: text.into(),
        });
    }

    pub fn replace(&mut self, mount: MountPoint, children: Vec<ViewNode>) {
        self.ops.push(ViewOp::Replace { mount, children });
    }

    pub fn set_visible(&mut self, mount: MountPoint, visible: bool) {
        self.ops.push(ViewOp::SetVisible { mount, visible });
    }

    pub fn extend(&mut self, other: ScreenFrame) {
        self.ops.extend(other.ops);
    }

    /// Ops addressed to one mount point, in order
    pub fn ops_for(&self, mount: MountPoint) -> impl Iterator<Item = &ViewOp> {
        self.ops.iter().filter(move |op| op.mount() == mount)
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_ids_are_unique() {
        let all = MountPoint::all();
        let mut ids: Vec<_> = all.iter().map(|m| m.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), all.len());
        assert_eq!(MountPoint::NonFriends(NumberKind::Conductor).id(), "conductorNonFriends");
    }

    #[test]
    fn test_serialized_op_shape() {
        let mut frame = ScreenFrame::new();
        frame.replace(
            MountPoint::LoshuGrid,
            vec![ViewNode::new("div").class("loshu-cell").text("4").tone(Tone::Missing)],
        );
        let json: serde_json::Value = serde_json::from_str(&frame.to_json().unwrap()).unwrap();
        let op = &json["ops"][0];
        assert_eq!(op["op"], "replace");
        assert_eq!(op["mount"], "loshuGrid");
        assert_eq!(op["children"][0]["classes"][0], "loshu-cell");
        assert_eq!(op["children"][0]["tone"], "missing");
        assert!(op["children"][0].get("children").is_none());
    }

    #[test]
    fn test_descendants() {
        let node = ViewNode::new("ul")
            .child(ViewNode::new("li").text("a"))
            .child(ViewNode::new("li").child(ViewNode::new("span")));
        assert_eq!(node.descendants().len(), 4);
    }
}
