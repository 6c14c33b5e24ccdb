use super::*;

#[test]
fn months_run_from_start_through_december() {
    assert_eq!(credit_card_months(10).collect::<Vec<_>>(), vec![10, 11, 12]);
    assert_eq!(credit_card_months(1).count(), 12);
}

#[test]
fn out_of_range_start_month_is_clamped() {
    assert_eq!(credit_card_months(0).count(), 12);
    assert_eq!(credit_card_months(15).collect::<Vec<_>>(), vec![12]);
}

#[test]
fn years_cover_eleven_years_and_can_be_restarted() {
    let years = credit_card_years(2026);
    assert_eq!(years.clone().count(), 11);
    assert_eq!(years.clone().next(), Some(2026));
    assert_eq!(years.last(), Some(2036));
}

#[test]
fn years_from_now_start_at_current_year() {
    let years = credit_card_years_from_now();
    assert_eq!(*years.start(), Local::now().year());
    assert!((1..=12).contains(&current_month()));
}

#[test]
fn years_near_the_integer_limit_saturate() {
    let years = credit_card_years(i32::MAX - 3);
    assert_eq!(*years.end(), i32::MAX);
    assert_eq!(years.count(), 4);
}
