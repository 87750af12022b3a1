use core::ops::RangeInclusive;

/// Specifies where the physical instances of a logical object live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// A single instance lives at the given parallel id, whichever context asks for it.
    Fixed(i64),
    /// Each parallel id holds its own independent instance.
    Mirrored,
    /// The object is broadcast: every parallel id holds an identical replica.
    All,
}

/// How many physical instances a placement calls for and how they relate to each other.
///
/// This is what the object creation subsystem needs to know; resolution alone cannot tell
/// [`Placement::Mirrored`] and [`Placement::All`] apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Replication {
    /// One instance, at the given parallel id.
    Single(i64),
    /// One instance per parallel id, each populated on its own.
    Independent,
    /// One instance per parallel id, all holding the same value.
    Replicated,
}

impl Placement {
    /// Returns the replication policy implied by this placement.
    pub fn replication(&self) -> Replication {
        match self {
            Placement::Fixed(parallel_id) => Replication::Single(*parallel_id),
            Placement::Mirrored => Replication::Independent,
            Placement::All => Replication::Replicated,
        }
    }

    /// Returns the parallel ids holding an instance when `parallel_num` contexts participate.
    ///
    /// The range is empty for per-rank placements when `parallel_num` is not positive.
    pub fn instance_parallel_ids(&self, parallel_num: i64) -> RangeInclusive<i64> {
        match self {
            Placement::Fixed(parallel_id) => *parallel_id..=*parallel_id,
            Placement::Mirrored | Placement::All => 0..=parallel_num.saturating_sub(1),
        }
    }

    /// The parallel id of a fixed placement, `None` otherwise.
    pub fn fixed_parallel_id(&self) -> Option<i64> {
        match self {
            Placement::Fixed(parallel_id) => Some(*parallel_id),
            _ => None,
        }
    }

    /// Whether the placement is [`Placement::Fixed`].
    pub fn is_fixed(&self) -> bool {
        matches!(self, Placement::Fixed(_))
    }

    /// Whether the placement is [`Placement::Mirrored`].
    pub fn is_mirrored(&self) -> bool {
        matches!(self, Placement::Mirrored)
    }

    /// Whether the placement is [`Placement::All`].
    pub fn is_all(&self) -> bool {
        matches!(self, Placement::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_replication_is_three_way() {
        assert_eq!(Placement::Fixed(2).replication(), Replication::Single(2));
        assert_eq!(Placement::Mirrored.replication(), Replication::Independent);
        assert_eq!(Placement::All.replication(), Replication::Replicated);
    }

    #[test]
    fn test_fixed_has_a_single_instance() {
        let ids: Vec<i64> = Placement::Fixed(3).instance_parallel_ids(8).collect();

        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_mirrored_and_all_have_an_instance_per_rank() {
        let mirrored: Vec<i64> = Placement::Mirrored.instance_parallel_ids(4).collect();
        let all: Vec<i64> = Placement::All.instance_parallel_ids(4).collect();

        assert_eq!(mirrored, vec![0, 1, 2, 3]);
        assert_eq!(all, mirrored);
    }

    #[test]
    fn test_fixed_at_the_last_parallel_id() {
        let ids: Vec<i64> = Placement::Fixed(i64::MAX).instance_parallel_ids(4).collect();

        assert_eq!(ids, vec![i64::MAX]);
    }

    #[test]
    fn test_per_rank_placements_without_ranks() {
        assert_eq!(Placement::Mirrored.instance_parallel_ids(0).count(), 0);
        assert_eq!(Placement::All.instance_parallel_ids(-3).count(), 0);
        assert_eq!(Placement::All.instance_parallel_ids(i64::MIN).count(), 0);
    }

    #[test]
    fn test_predicates() {
        assert!(Placement::Fixed(0).is_fixed());
        assert!(Placement::Mirrored.is_mirrored());
        assert!(Placement::All.is_all());
        assert!(!Placement::All.is_mirrored());
        assert_eq!(Placement::Fixed(5).fixed_parallel_id(), Some(5));
        assert_eq!(Placement::Mirrored.fixed_parallel_id(), None);
    }
}
