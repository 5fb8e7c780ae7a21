//! Product file naming convention.
//!
//! `{PREFIX}_{TYPE}_{SENSOR}_{PLATFORM}_{START}_{END}_{LEVEL}_v{VERSION}_fv{WRITER}.nc`
//! with timestamps rendered as `%Y%m%d%H%M%S`.
use chrono::{DateTime, Utc};

use crate::types::ProductLevel;
use crate::WRITER_VERSION;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// File name for a CDR product, e.g.
/// `FIDUCEO_CDR_AOT_MVIRI_MET7-0.00_20150823142452_20150823152553_L2_v02.3_fv2.0.0.nc`.
#[allow(clippy::too_many_arguments)]
pub fn create_file_name_cdr(
    cdr_type: &str,
    sensor: &str,
    platform: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    level: ProductLevel,
    version: &str,
) -> String {
    format!(
        "FIDUCEO_CDR_{}_{}_{}_{}_{}_{}_v{}_fv{}.nc",
        cdr_type,
        sensor,
        platform,
        start.format(TIMESTAMP_FORMAT),
        end.format(TIMESTAMP_FORMAT),
        level,
        version,
        WRITER_VERSION
    )
}

/// File name for an FCDR product; the type slot is the fixed `L1C` tag.
pub fn create_file_name_fcdr(
    sensor: &str,
    platform: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    level: ProductLevel,
    version: &str,
) -> String {
    format!(
        "FIDUCEO_FCDR_L1C_{}_{}_{}_{}_{}_v{}_fv{}.nc",
        sensor,
        platform,
        start.format(TIMESTAMP_FORMAT),
        end.format(TIMESTAMP_FORMAT),
        level,
        version,
        WRITER_VERSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn cdr_file_name_layout() {
        let start = Utc.with_ymd_and_hms(2015, 8, 23, 14, 24, 52).unwrap();
        let end = Utc.with_ymd_and_hms(2015, 8, 23, 15, 25, 53).unwrap();
        let name = create_file_name_cdr(
            "AOT",
            "MVIRI",
            "MET7-0.00",
            start,
            end,
            ProductLevel::L2,
            "02.3",
        );
        assert_eq!(
            name,
            format!(
                "FIDUCEO_CDR_AOT_MVIRI_MET7-0.00_20150823142452_20150823152553_L2_v02.3_fv{WRITER_VERSION}.nc"
            )
        );
    }

    #[test]
    fn fcdr_file_name_layout() {
        let start = Utc.with_ymd_and_hms(2009, 4, 1, 1, 23, 45).unwrap();
        let end = Utc.with_ymd_and_hms(2009, 4, 1, 3, 1, 2).unwrap();
        let name = create_file_name_fcdr(
            "AVHRR",
            "N18",
            start,
            end,
            ProductLevel::Easy,
            "1.0",
        );
        assert_eq!(
            name,
            format!("FIDUCEO_FCDR_L1C_AVHRR_N18_20090401012345_20090401030102_EASY_v1.0_fv{WRITER_VERSION}.nc")
        );
    }
}
