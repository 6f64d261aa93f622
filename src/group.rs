//! Group records partition a point collection into scan lines.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One group of consecutive points, e.g. one scan line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    /// The row or column index shared by the group's points.
    pub id: i64,
    /// The index of the group's first point in the point stream.
    pub start_point_index: i64,
    /// The number of points in the group.
    pub point_count: i64,
}

impl GroupRecord {
    /// Creates a new group record.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::GroupRecord;
    /// let group = GroupRecord::new(0, 0, 10);
    /// assert_eq!(10, group.end());
    /// ```
    pub fn new(id: i64, start_point_index: i64, point_count: i64) -> GroupRecord {
        GroupRecord {
            id,
            start_point_index,
            point_count,
        }
    }

    /// Returns the index one past the group's last point.
    pub fn end(&self) -> i64 {
        self.start_point_index.saturating_add(self.point_count)
    }
}

/// Checks that groups are non-overlapping, increasing, and fit inside `total` points.
///
/// # Examples
///
/// ```
/// use e57_simple::{group, GroupRecord};
/// let groups = [GroupRecord::new(0, 0, 10), GroupRecord::new(1, 5, 10)];
/// assert!(group::validate(&groups, 15).is_err());
/// ```
pub fn validate(groups: &[GroupRecord], total: u64) -> Result<()> {
    let total = i64::try_from(total)?;
    let mut previous_end = 0;
    for (index, group) in groups.iter().enumerate() {
        let reason = if group.point_count < 0 {
            "negative point count"
        } else if group.start_point_index < 0 {
            "negative start point index"
        } else if group.start_point_index < previous_end {
            "overlaps or precedes the previous group"
        } else if group.end() > total {
            "extends past the end of the point collection"
        } else {
            previous_end = group.end();
            continue;
        };
        return Err(Error::InvalidGroupLayout { index, reason });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid() {
        let groups = [
            GroupRecord::new(0, 0, 10),
            GroupRecord::new(1, 10, 0),
            GroupRecord::new(2, 12, 3),
        ];
        validate(&groups, 15).unwrap();
        validate(&[], 0).unwrap();
    }

    #[test]
    fn overlapping() {
        let groups = [GroupRecord::new(0, 0, 10), GroupRecord::new(1, 5, 10)];
        assert!(matches!(
            validate(&groups, 15),
            Err(Error::InvalidGroupLayout { index: 1, .. })
        ));
    }

    #[test]
    fn decreasing() {
        let groups = [GroupRecord::new(0, 10, 2), GroupRecord::new(1, 0, 2)];
        assert!(validate(&groups, 12).is_err());
    }

    #[test]
    fn past_the_end() {
        let groups = [GroupRecord::new(0, 0, 11)];
        assert!(matches!(
            validate(&groups, 10),
            Err(Error::InvalidGroupLayout { index: 0, .. })
        ));
    }

    #[test]
    fn negative() {
        assert!(validate(&[GroupRecord::new(0, 0, -1)], 10).is_err());
        assert!(validate(&[GroupRecord::new(0, -1, 1)], 10).is_err());
    }
}
