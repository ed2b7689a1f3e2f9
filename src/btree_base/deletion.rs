use bitmask_enum::bitmask;

/// What a removal did to the tree.
#[bitmask(u8)]
pub enum DeletionResultFlags {
    Ok = 0,
    NotFound = 1,
    BorrowedLeft = 2,
    BorrowedRight = 4,
    Merged = 8,
    RootCollapsed = 16,
}

pub struct DeletionResult<V> {
    pub flags: DeletionResultFlags,
    pub value: Option<V>,
}

impl<V> DeletionResult<V> {
    pub fn not_found() -> Self {
        Self {
            flags: DeletionResultFlags::NotFound,
            value: None,
        }
    }

    pub fn removed(value: V, flags: DeletionResultFlags) -> Self {
        Self {
            flags,
            value: Some(value),
        }
    }

    pub fn has(&self, flag: DeletionResultFlags) -> bool {
        self.flags.contains(flag)
    }
}
