/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// The leap day, February 29th
pub const LEAP_DAY: u8 = 29;
/// Last day of February in common years, where leap-day birthdays are observed
pub const FEBRUARY_LAST_COMMON_DAY: u8 = 28;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Earliest accepted birth year
pub const MIN_BIRTH_YEAR: i32 = 1900;
/// Latest representable birth year (four digits)
pub const MAX_BIRTH_YEAR: i32 = 9999;

/// A leap year used when a month/day has to be rendered without a known year
pub const DISPLAY_LEAP_YEAR: i32 = 2000;

/// Upper bound of the "soon" window, in days
pub const SOON_WITHIN_DAYS: u32 = 7;

/// Maximum contact name length, in characters
pub const MAX_NAME_LEN: usize = 100;
/// Maximum contact notes length, in characters
pub const MAX_NOTES_LEN: usize = 500;
/// Digits in a birth year typed into a form
pub const YEAR_DIGITS: usize = 4;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Separator between birthday components (`MM-DD` / `YYYY-MM-DD`)
pub const DATE_SEPARATOR: char = '-';
