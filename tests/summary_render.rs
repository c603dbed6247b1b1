use booking_core::{summary_text, RecordUpdate};
use booking_domain::{BookingRecord, FieldId, JourneyType};
use insta::assert_snapshot;

fn apply(record: &mut BookingRecord, field: FieldId, raw: &str) {
    RecordUpdate::parse(field, raw)
        .and_then(|update| update.apply(record))
        .expect("valid update");
}

#[test]
fn summary_text_for_a_return_booking() {
    let mut record = BookingRecord::default();
    record.journey.journey_type = JourneyType::Return;
    apply(&mut record, FieldId::CollectionPoint, "Geneva Airport");
    apply(&mut record, FieldId::DestinationPoint, "Verbier");
    apply(&mut record, FieldId::CollectionDate, "2099-01-10");
    apply(&mut record, FieldId::CollectionTime, "09:30");
    apply(&mut record, FieldId::ReturnDate, "2099-01-20");
    apply(&mut record, FieldId::ReturnTime, "14:00");
    apply(&mut record, FieldId::Adults, "3");
    apply(&mut record, FieldId::Suitcases, "2");
    apply(&mut record, FieldId::Skis, "1");
    apply(&mut record, FieldId::PassengerName, "Ada Lovelace");
    apply(&mut record, FieldId::PassengerEmail, "ada@example.com");
    apply(&mut record, FieldId::PassengerPhone, "+41 79 123 45 67");

    assert_snapshot!(summary_text(&record), @r###"
    Journey:     Return
    From:        Geneva Airport
    To:          Verbier
    Collection:  Sat 10 Jan 2099 at 09:30
    Return:      Tue 20 Jan 2099 at 14:00
    Passengers:  3 adult(s), 0 child(ren)
    Suitcases:   2
    Skis:        1
    Name:        Ada Lovelace
    Email:       ada@example.com
    Phone:       +41 79 123 45 67
    "###);
}

#[test]
fn one_way_summary_has_no_return_row() {
    let record = BookingRecord::default();
    let text = summary_text(&record);
    assert!(text.starts_with("Journey:"));
    assert!(!text.contains("Return:"));
    assert!(text.contains("Collection:  -"));
}
