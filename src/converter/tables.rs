/// 번호 앞자리 테이블.
///
/// 통신사별 목록을 그대로 이어 붙인 것이라 중복이 있다. 중복은 선택 분포에
/// 영향을 주므로 정리하지 않는다. 순서도 해시 인덱스와 직결되므로 바꾸면 안 된다.
pub const PHONE_PREFIXES: &[&str] = &[
    "130", "131", "132", "133", "134", "135", "136", "137", "138", "139",
    "150", "151", "152", "153", "155", "156", "157", "158", "159",
    "180", "181", "182", "183", "184", "185", "186", "187", "188", "189",
    "145", "147",
    "166", "167",
    "1703", "1705", "1706",
    "1349",
    "1860", "1861", "1862", "1863", "1864", "1865", "1866", "1867", "1868", "1869",
    "130", "131", "132", "133", "134", "135", "136", "137", "138", "139",
    "150", "151", "152", "153", "155", "156", "157", "158", "159",
    "180", "181", "182", "183", "184", "185", "186", "187", "188", "189",
    "145", "147",
    "166", "167",
    "1704", "1707", "1708", "1709",
    "176", "175",
    "1860", "1861", "1862", "1863", "1864", "1865", "1866", "1867", "1868", "1869",
    "133", "134", "135", "136", "137", "138", "139",
    "150", "151", "152", "153", "155", "156", "157", "158", "159",
    "180", "181", "182", "183", "184", "185", "186", "187", "188", "189",
    "145", "147",
    "166", "167",
    "1700", "1701", "1702",
    "177", "173",
    "1860", "1861", "1862", "1863", "1864", "1865", "1866", "1867", "1868", "1869",
];

/// Exact uid -> number overrides, checked before hashing.
pub const SPECIAL_MAPPINGS: &[(&str, &str)] = &[
    ("100000000", "13800138000"),
    ("100000001", "13800138001"),
    ("100000002", "13800138002"),
];

/// Prefix used by the backup generator and when a selected prefix leaves no room for a suffix.
pub const FALLBACK_PREFIX: &str = "138";

pub const PHONE_LENGTH: usize = 11;
