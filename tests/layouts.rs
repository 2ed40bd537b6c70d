use chrono::Weekday;

use calgrid::annotate::MAX_DAYS;
use calgrid::spread::YearSpread;
use calgrid::{
    AnsiSurface, CalendarOptions, CalendarRequest, ChronoNames, Event, FillPattern, Layout,
    PageDecor, PhotoList, YearOrientation, partition, render, year_page,
};

fn render_to_string(
    layout: Layout,
    request: &CalendarRequest,
    events: &[Event],
    photos: &PhotoList,
    locale: &str,
) -> String {
    let names = ChronoNames::from_code(locale);
    let decor = PageDecor {
        names: &names,
        photos,
        footer: "",
    };
    let mut surface = AnsiSurface::new(Vec::new(), false);
    render(&mut surface, layout, request, events, &decor).unwrap();
    String::from_utf8(surface.into_inner()).unwrap()
}

#[test]
fn spread_partitions_cover_the_year_once() {
    for pages in [1, 2, 3, 4, 6, 12] {
        let plan = partition(YearSpread::new(pages).unwrap());
        let months: Vec<u32> = plan.iter().flatten().collect();
        assert_eq!(months, (1..=12).collect::<Vec<_>>(), "{pages} pages");
        assert_eq!(plan.pages_count() * plan.months_per_page(), 12);
    }
    assert!(YearSpread::new(5).is_none());
    assert!(YearSpread::new(0).is_none());
}

#[test]
fn month_range_renders_one_page_per_month() {
    let request = CalendarRequest::new(3, 5, 2024, CalendarOptions::default()).unwrap();
    let out = render_to_string(Layout::Month, &request, &[], &PhotoList::default(), "en_US");
    let titles: Vec<&str> = out.lines().filter(|l| l.ends_with(" 2024")).collect();
    assert_eq!(titles, vec!["March 2024", "April 2024", "May 2024"]);
}

#[test]
fn localized_titles_and_photos() {
    let request = CalendarRequest::new(3, 3, 2024, CalendarOptions::default()).unwrap();
    let photos = PhotoList::single("spring.jpg");
    let out = render_to_string(Layout::Month, &request, &[], &photos, "de_DE.UTF-8");
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("März 2024"));
    assert_eq!(lines.next(), Some("[image: spring.jpg]"));
}

#[test]
fn plain_month_has_no_annotation_lines() {
    let options = CalendarOptions {
        plain: true,
        ..Default::default()
    };
    let request = CalendarRequest::new(2, 2, 2024, options).unwrap();
    let events = vec![Event::new(2, 14, "Valentine", None).unwrap()];
    let out = render_to_string(Layout::Month, &request, &events, &PhotoList::default(), "en_US");
    // Title, weekday header, six week rows and the page break.
    assert_eq!(out.lines().count(), 9, "{out}");
    assert!(!out.contains("Valentine"));
    assert!(!out.contains("Wk"));
}

#[test]
fn hidden_neighbours_render_blank() {
    let options = CalendarOptions {
        hide_other_months: true,
        plain: true,
        ..Default::default()
    };
    let request = CalendarRequest::new(2, 2, 2024, options).unwrap();
    let out = render_to_string(Layout::Month, &request, &[], &PhotoList::default(), "en_US");
    let first_week = out.lines().nth(2).unwrap();
    assert_eq!(first_week, format!("{:15}   1    2    3    4 ", ""));
}

#[test]
fn year_grids_hold_every_date_once() {
    for orientation in [YearOrientation::MonthRows, YearOrientation::DayRows] {
        let page = year_page(2024, 1..=12, orientation, &CalendarOptions::default(), &[]).unwrap();
        let filled = page.rows().iter().flatten().filter(|c| c.is_some()).count();
        assert_eq!(filled, 366, "{orientation:?}");
        for month in 1..=12 {
            assert!(page.day(month, 1).is_some());
        }
        assert!(page.day(2, 30).is_none());
        assert!(page.day(6, MAX_DAYS as u32).is_none());
    }
}

#[test]
fn fill_pattern_marks_weekends_in_year_grid() {
    let options = CalendarOptions {
        fill_pattern: FillPattern::from("Ss"),
        ..Default::default()
    };
    let page = year_page(2024, 1..=12, YearOrientation::MonthRows, &options, &[]).unwrap();
    for cell in page.rows().iter().flatten().flatten() {
        let weekend = matches!(cell.weekday(), Weekday::Sat | Weekday::Sun);
        assert_eq!(cell.fill, weekend, "{}", cell.date);
    }
}

#[test]
fn year_layout_single_page() {
    let request = CalendarRequest::full_year(2024, CalendarOptions::default());
    let out = render_to_string(Layout::Year, &request, &[], &PhotoList::default(), "en_US");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "2024");
    // Title, day header, twelve month rows and the page break.
    assert_eq!(lines.len(), 15);
    assert!(lines[2].starts_with("   January"), "{:?}", lines[2]);
    assert!(lines[3].starts_with("  February"), "{:?}", lines[3]);
}
