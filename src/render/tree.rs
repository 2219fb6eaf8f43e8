//! In-memory live view that frames are applied to
//!
//! Stands in for the page's element tree: each mount point owns its text,
//! its children and a visibility flag.

use crate::error::ViewError;
use crate::render::view::{MountPoint, ScreenFrame, ViewNode, ViewOp};
use rustc_hash::FxHashMap;

/// Current content of one mount point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountState {
    pub text: Option<String>,
    pub children: Vec<ViewNode>,
    pub visible: bool,
}

impl Default for MountState {
    fn default() -> Self {
        Self {
            text: None,
            children: Vec::new(),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTree {
    mounts: FxHashMap<MountPoint, MountState>,
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTree {
    /// A view containing every mount point, with the error banner and the
    /// results panel hidden as on first load
    pub fn new() -> Self {
        let mut tree = Self::with_mounts(MountPoint::all());
        for hidden in [MountPoint::ErrorBanner, MountPoint::Results] {
            if let Some(state) = tree.mounts.get_mut(&hidden) {
                state.visible = false;
            }
        }
        tree
    }

    /// A view containing only the given mount points
    pub fn with_mounts(mounts: impl IntoIterator<Item = MountPoint>) -> Self {
        Self {
            mounts: mounts
                .into_iter()
                .map(|m| (m, MountState::default()))
                .collect(),
        }
    }

    /// Apply every op of a frame in order. Stops at the first op whose
    /// mount point is absent; earlier ops stay applied.
    pub fn apply(&mut self, frame: &ScreenFrame) -> Result<(), ViewError> {
        for op in &frame.ops {
            self.apply_op(op)?;
        }
        Ok(())
    }

    pub fn apply_op(&mut self, op: &ViewOp) -> Result<(), ViewError> {
        let mount = op.mount();
        let state = self
            .mounts
            .get_mut(&mount)
            .ok_or_else(|| ViewError::MissingMount(mount.id().into_owned()))?;
        match op {
            ViewOp::Replace { children, .. } => {
                state.text = None;
                state.children = children.clone();
            }
            ViewOp::SetText { text, .. } => {
                state.children.clear();
                state.text = Some(text.clone());
            }
            ViewOp::SetVisible { visible, .. } => state.visible = *visible,
        }
        Ok(())
    }

    pub fn state(&self, mount: MountPoint) -> Option<&MountState> {
        self.mounts.get(&mount)
    }

    pub fn text(&self, mount: MountPoint) -> Option<&str> {
        self.mounts.get(&mount).and_then(|s| s.text.as_deref())
    }

    pub fn children(&self, mount: MountPoint) -> &[ViewNode] {
        self.mounts
            .get(&mount)
            .map(|s| s.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_visible(&self, mount: MountPoint) -> bool {
        self.mounts.get(&mount).map_or(false, |s| s.visible)
    }

    /// Texts of every node under a mount point, depth first
    pub fn texts_under(&self, mount: MountPoint) -> Vec<&str> {
        self.children(mount)
            .iter()
            .flat_map(|child| child.descendants())
            .filter_map(|node| node.text.as_deref())
            .collect()
    }
}
