//! Tests for error codes and non-fatal error collection.

use std::path::PathBuf;

use pacprune_core::errors::{
    ArchiveError, LayoutError, PlanResult, PruneError, PruneErrorCode, RecordError, StatError,
};

#[test]
fn codes_follow_taxonomy() {
    let corrupt = ArchiveError::Corrupt {
        path: PathBuf::from("/repo/x/x.files"),
        message: "truncated frame".to_string(),
    };
    assert_eq!(corrupt.error_code(), "CORRUPT_ARCHIVE");

    let record = RecordError::MissingKey {
        archive: PathBuf::from("/repo/x/x.files"),
        member: "foo-1.0-1/desc".to_string(),
        key: "VERSION",
    };
    assert_eq!(record.error_code(), "MALFORMED_RECORD");

    let layout = LayoutError::RootIsRepository {
        root: PathBuf::from("/repo/x"),
        index: PathBuf::from("/repo/x/x.files"),
    };
    assert_eq!(layout.error_code(), "LAYOUT_VIOLATION");
}

#[test]
fn aggregate_error_keeps_subsystem_code() {
    let err: PruneError = LayoutError::MissingDirectory {
        path: PathBuf::from("/repo/sources"),
        index: PathBuf::from("/repo/x/x.files"),
    }
    .into();
    assert_eq!(err.error_code(), "LAYOUT_VIOLATION");
    assert!(err.is_fatal());
    assert!(err.coded_string().starts_with("[LAYOUT_VIOLATION] "));
}

#[test]
fn stat_errors_are_not_fatal() {
    let vanished = StatError::from_io(
        PathBuf::from("/repo/x/gone.pkg.tar.zst"),
        std::io::Error::from(std::io::ErrorKind::NotFound),
    );
    assert!(matches!(vanished, StatError::Vanished { .. }));
    assert!(!vanished.is_fatal());

    let denied = StatError::from_io(
        PathBuf::from("/repo/x/locked.pkg.tar.zst"),
        std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    );
    assert!(matches!(denied, StatError::Io { .. }));
    assert_eq!(denied.path(), PathBuf::from("/repo/x/locked.pkg.tar.zst"));

    let wrapped: PruneError = denied.into();
    assert!(!wrapped.is_fatal());
}

#[test]
fn plan_result_accumulates() {
    let mut result: PlanResult<Vec<u32>> = PlanResult::new(vec![1, 2]);
    assert!(result.is_clean());

    result.add_error(StatError::Vanished {
        path: PathBuf::from("a"),
    });
    result.extend_errors([StatError::Vanished {
        path: PathBuf::from("b"),
    }]);

    assert_eq!(result.error_count(), 2);
    assert_eq!(result.data, vec![1, 2]);
}
