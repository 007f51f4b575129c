use dns_sieve_domain::{QueryClass, RecordType, ResponseCode};

#[test]
fn test_record_type_wire_values() {
    assert_eq!(RecordType::from_u16(1), RecordType::A);
    assert_eq!(RecordType::from_u16(28), RecordType::AAAA);
    assert_eq!(RecordType::from_u16(255), RecordType::ANY);
    assert_eq!(RecordType::from_u16(1).to_string(), "A");
}

#[test]
fn test_unknown_record_type_keeps_its_value() {
    let rt = RecordType::from_u16(4242);
    assert_eq!(rt, RecordType::Unknown(4242));
    assert_eq!(rt.to_string(), "TYPE4242");
}

#[test]
fn test_query_class_wire_values() {
    assert_eq!(QueryClass::from_u16(1), QueryClass::IN);
    assert_eq!(QueryClass::from_u16(3), QueryClass::CH);
    assert_eq!(QueryClass::from_u16(77), QueryClass::Unknown(77));
    assert_eq!(QueryClass::CH.to_string(), "CH");
    assert_eq!(QueryClass::from_u16(77).to_string(), "CLASS77");
}

#[test]
fn test_response_code_low_bits() {
    assert_eq!(ResponseCode::FormErr.low_bits(), 1);
    assert_eq!(ResponseCode::ServFail.low_bits(), 2);
    assert_eq!(ResponseCode::Refused.low_bits(), 5);
    assert_eq!(ResponseCode::from_low_bits(0x85), Some(ResponseCode::Refused));
    assert_eq!(ResponseCode::from_low_bits(0x0B), None);
    assert_eq!(ResponseCode::Refused.to_string(), "REFUSED");
}
