use serde::{Deserialize, Serialize};

use super::{Operand, Placement};
use crate::LogicalObjectId;

/// Marker selecting the mirrored placement in an [`OperandRecord`].
///
/// A braced struct rather than a unit struct, so that self-describing formats encode it as an
/// empty map instead of `null`, which would read back as an absent field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirroredParallelId {}

/// Marker selecting the broadcast placement in an [`OperandRecord`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllParallelId {}

/// Serialized form of an [`Operand`].
///
/// Exactly one of the placement fields is expected to be set. A record without any placement is
/// malformed and converting it into an [`Operand`] panics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperandRecord {
    /// Raw value of the referenced logical object.
    pub logical_object_id: i64,
    /// Parallel id of a fixed placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_parallel_id: Option<i64>,
    /// Present for a mirrored placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirrored_parallel_id: Option<MirroredParallelId>,
    /// Present for a broadcast placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_parallel_id: Option<AllParallelId>,
}

impl OperandRecord {
    /// Creates a record without any placement.
    pub fn new(logical_object_id: i64) -> Self {
        Self {
            logical_object_id,
            fixed_parallel_id: None,
            mirrored_parallel_id: None,
            all_parallel_id: None,
        }
    }

    /// Sets the fixed placement field.
    pub fn with_fixed_parallel_id(mut self, parallel_id: i64) -> Self {
        self.fixed_parallel_id = Some(parallel_id);
        self
    }

    /// Sets the mirrored marker.
    pub fn with_mirrored_parallel_id(mut self) -> Self {
        self.mirrored_parallel_id = Some(MirroredParallelId {});
        self
    }

    /// Sets the broadcast marker.
    pub fn with_all_parallel_id(mut self) -> Self {
        self.all_parallel_id = Some(AllParallelId {});
        self
    }

    fn placement(&self) -> Option<Placement> {
        if let Some(parallel_id) = self.fixed_parallel_id {
            Some(Placement::Fixed(parallel_id))
        } else if self.mirrored_parallel_id.is_some() {
            Some(Placement::Mirrored)
        } else if self.all_parallel_id.is_some() {
            Some(Placement::All)
        } else {
            None
        }
    }
}

impl From<Operand> for OperandRecord {
    fn from(operand: Operand) -> Self {
        let record = OperandRecord::new(operand.logical_object_id().value());

        match operand.placement() {
            Placement::Fixed(parallel_id) => record.with_fixed_parallel_id(parallel_id),
            Placement::Mirrored => record.with_mirrored_parallel_id(),
            Placement::All => record.with_all_parallel_id(),
        }
    }
}

impl From<OperandRecord> for Operand {
    /// Rebuilds the operand from whichever placement field the record carries.
    ///
    /// # Panics
    ///
    /// If the record carries no placement at all. Such a record can only come from a corrupted
    /// stream or a faulty producer and must not be defaulted to some variant.
    fn from(record: OperandRecord) -> Self {
        let logical_object_id = LogicalObjectId::new(record.logical_object_id);

        match record.placement() {
            Some(placement) => Operand::new(logical_object_id, placement),
            None => unreachable!(
                "Operand record of logical object {logical_object_id} has no placement"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_record_from_fixed_operand() {
        let record = OperandRecord::from(Operand::fixed(LogicalObjectId::new(42), 3));

        assert_eq!(record, OperandRecord::new(42).with_fixed_parallel_id(3));
    }

    #[test]
    fn test_fixed_record_reads_the_incoming_value() {
        let operand = Operand::from(OperandRecord::new(42).with_fixed_parallel_id(3));

        assert_eq!(operand, Operand::fixed(LogicalObjectId::new(42), 3));
        assert_eq!(operand.get_parallel_id(0), 3);
        assert_eq!(operand.get_parallel_id(7), 3);
    }

    #[test]
    fn test_marker_records() {
        let mirrored = Operand::from(OperandRecord::new(42).with_mirrored_parallel_id());
        let all = Operand::from(OperandRecord::new(42).with_all_parallel_id());

        assert_eq!(mirrored.placement(), Placement::Mirrored);
        assert_eq!(all.placement(), Placement::All);
    }

    #[test]
    fn test_fixed_takes_precedence_over_markers() {
        let record = OperandRecord::new(1)
            .with_all_parallel_id()
            .with_mirrored_parallel_id()
            .with_fixed_parallel_id(2);

        assert_eq!(Operand::from(record).placement(), Placement::Fixed(2));
    }

    #[test]
    #[should_panic = "Operand record of logical object 42 has no placement"]
    fn test_record_without_placement_is_fatal() {
        let _operand = Operand::from(OperandRecord::new(42));
    }

    #[test]
    #[should_panic = "has no placement"]
    fn test_wire_record_without_placement_is_fatal() {
        let _operand: Operand = serde_json::from_str(r#"{"logical_object_id":42}"#).unwrap();
    }

    #[rstest]
    #[case(r#"{"logical_object_id":42,"fixed_parallel_id":3}"#, Placement::Fixed(3))]
    #[case(r#"{"logical_object_id":42,"mirrored_parallel_id":{}}"#, Placement::Mirrored)]
    #[case(r#"{"logical_object_id":42,"all_parallel_id":{}}"#, Placement::All)]
    fn test_wire_format(#[case] json: &str, #[case] placement: Placement) {
        let operand = Operand::new(LogicalObjectId::new(42), placement);

        assert_eq!(serde_json::to_string(&operand).unwrap(), json);
        assert_eq!(serde_json::from_str::<Operand>(json).unwrap(), operand);
    }

    #[rstest]
    #[case(Operand::fixed(LogicalObjectId::new(42), 3))]
    #[case(Operand::mirrored(LogicalObjectId::new(42)))]
    #[case(Operand::all(LogicalObjectId::new(42)))]
    fn test_round_trip_resolves_identically(#[case] operand: Operand) {
        let json = serde_json::to_string(&operand).unwrap();
        let decoded: Operand = serde_json::from_str(&json).unwrap();

        for parallel_id in 0..8 {
            assert_eq!(
                decoded.get_parallel_id(parallel_id),
                operand.get_parallel_id(parallel_id)
            );
        }
        assert_eq!(decoded.placement().replication(), operand.placement().replication());
    }
}
