//! CAA query encoding and lenient answer decoding.
//!
//! Answers are walked record by record instead of going through
//! `Message::from_vec`: hickory rejects a whole message when an `issue`,
//! `issuewild` or `iodef` value does not follow the RFC 8659 grammar, while a
//! CAA value here is opaque and any CAA record counts.

use hickory_resolver::proto::error::{ProtoError, ProtoResult};
use hickory_resolver::proto::op::{Edns, Header, Message, MessageType, OpCode, Query, ResponseCode};
use hickory_resolver::proto::rr::{Name, RecordType};
use hickory_resolver::proto::serialize::binary::{BinDecodable, BinDecoder};

use super::lookup::{CaaRecord, CaaTag};

/// UDP payload size advertised through EDNS.
pub(crate) const EDNS_PAYLOAD: u16 = 1232;

/// The parts of a DNS response the CAA client needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CaaResponse {
    pub id: u16,
    pub truncated: bool,
    pub response_code: ResponseCode,
    /// CAA records of the answer section, in answer order
    pub records: Vec<CaaRecord>,
}

/// Encodes a recursive CAA query for `domain`.
///
/// The name is made absolute so no search domain is ever applied.
pub(crate) fn build_query(id: u16, domain: &str) -> ProtoResult<Vec<u8>> {
    let name = Name::from_ascii(format!("{domain}."))?;

    let mut edns = Edns::new();
    edns.set_max_payload(EDNS_PAYLOAD);

    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(Query::query(name, RecordType::CAA))
        .set_edns(edns);

    message.to_vec()
}

/// Decodes a response, keeping only the CAA records of its answer section.
///
/// Other record types in the answer (e.g. CNAMEs) are skipped. The authority
/// and additional sections are not read.
///
/// # Errors
///
/// Returns a `ProtoError` if the header, question or record framing is
/// malformed. The content of a CAA value never causes an error.
pub(crate) fn decode_response(bytes: &[u8]) -> ProtoResult<CaaResponse> {
    let mut decoder = BinDecoder::new(bytes);
    let header = Header::read(&mut decoder)?;
    if header.message_type() != MessageType::Response {
        return Err(ProtoError::from("message is not a response"));
    }

    for _ in 0..header.query_count() {
        Query::read(&mut decoder)?;
    }

    let mut records = Vec::new();
    for _ in 0..header.answer_count() {
        let owner = Name::read(&mut decoder)?;
        let record_type = RecordType::from(decoder.read_u16()?.unverified());
        let _class = decoder.read_u16()?.unverified();
        let _ttl = decoder.read_u32()?.unverified();
        let rdata_len = usize::from(decoder.read_u16()?.unverified());
        let rdata = decoder.read_slice(rdata_len)?.unverified();

        if record_type == RecordType::CAA {
            records.push(caa_record(rdata));
        } else {
            log::debug!("Skipping {record_type} record for {owner} in CAA answer");
        }
    }

    Ok(CaaResponse {
        id: header.id(),
        truncated: header.truncated(),
        response_code: header.response_code(),
        records,
    })
}

/// Decodes CAA rdata: flags octet, tag length, tag, then the value as raw
/// octets up to the end of the rdata.
///
/// Rdata too short for its own tag still yields a record, with an empty
/// `Other` tag, so the domain is known to publish CAA.
fn caa_record(rdata: &[u8]) -> CaaRecord {
    let [flags, tag_len, rest @ ..] = rdata else {
        log::debug!("CAA rdata of {} octets has no tag", rdata.len());
        return malformed_caa_record(rdata);
    };
    let tag_len = usize::from(*tag_len);
    if rest.len() < tag_len {
        log::debug!("CAA tag length {tag_len} exceeds rdata");
        return malformed_caa_record(rdata);
    }

    let (tag, value) = rest.split_at(tag_len);
    CaaRecord {
        issuer_critical: flags & 0b1000_0000 != 0,
        tag: CaaTag::parse(&String::from_utf8_lossy(tag)),
        value: String::from_utf8_lossy(value).into_owned(),
    }
}

fn malformed_caa_record(rdata: &[u8]) -> CaaRecord {
    CaaRecord {
        issuer_critical: false,
        tag: CaaTag::Other(String::new()),
        value: String::from_utf8_lossy(rdata).into_owned(),
    }
}

/// Mnemonic for a response code, as printed by `dig`.
pub(crate) fn rcode_name(code: ResponseCode) -> String {
    match code {
        ResponseCode::NoError => "NOERROR".to_string(),
        ResponseCode::FormErr => "FORMERR".to_string(),
        ResponseCode::ServFail => "SERVFAIL".to_string(),
        ResponseCode::NXDomain => "NXDOMAIN".to_string(),
        ResponseCode::NotImp => "NOTIMP".to_string(),
        ResponseCode::Refused => "REFUSED".to_string(),
        other => format!("RCODE{}", u16::from(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::rr::rdata::{CAA, NULL};
    use hickory_resolver::proto::rr::{RData, Record};

    fn response_with(answers: Vec<Record>) -> Vec<u8> {
        let mut message = Message::new();
        message
            .set_id(7)
            .set_message_type(MessageType::Response)
            .add_query(Query::query(
                Name::from_ascii("example.com.").unwrap(),
                RecordType::CAA,
            ));
        for answer in answers {
            message.add_answer(answer);
        }
        message.to_vec().unwrap()
    }

    fn raw_caa(rdata: &[u8]) -> Record {
        Record::from_rdata(
            Name::from_ascii("example.com.").unwrap(),
            300,
            RData::Unknown {
                code: RecordType::CAA,
                rdata: NULL::with(rdata.to_vec()),
            },
        )
    }

    #[test]
    fn test_build_query_is_absolute_caa_question() {
        let bytes = build_query(42, "www.example.com").unwrap();
        let message = Message::from_vec(&bytes).unwrap();
        assert_eq!(message.id(), 42);
        assert!(message.recursion_desired());
        let query = &message.queries()[0];
        assert_eq!(query.query_type(), RecordType::CAA);
        assert!(query.name().is_fqdn());
        assert_eq!(query.name().to_ascii(), "www.example.com.");
        assert_eq!(message.max_payload(), EDNS_PAYLOAD);
    }

    #[test]
    fn test_decode_issuer_value() {
        let caa = CAA::new_issue(true, Some(Name::from_ascii("ca.example").unwrap()), Vec::new());
        let bytes = response_with(vec![Record::from_rdata(
            Name::from_ascii("example.com.").unwrap(),
            300,
            RData::CAA(caa),
        )]);

        let response = decode_response(&bytes).unwrap();
        assert_eq!(response.id, 7);
        assert_eq!(response.response_code, ResponseCode::NoError);
        assert!(!response.truncated);
        assert_eq!(response.records.len(), 1);
        assert!(response.records[0].issuer_critical);
        assert_eq!(response.records[0].tag, CaaTag::Issue);
        assert_eq!(response.records[0].value, "ca.example");
    }

    #[test]
    fn test_decode_keeps_non_grammar_value_verbatim() {
        let bytes = response_with(vec![raw_caa(b"\x00\x05issueca.example; account")]);

        let response = decode_response(&bytes).unwrap();
        assert_eq!(
            response.records,
            vec![CaaRecord::issue("ca.example; account")]
        );
        // hickory's own decoder refuses the same message
        assert!(Message::from_vec(&bytes).is_err());
    }

    #[test]
    fn test_decode_empty_issuer_and_parameters() {
        let bytes = response_with(vec![
            raw_caa(b"\x00\x05issue;"),
            raw_caa(b"\x00\x09issuewildca.example; account=1234"),
        ]);

        let records = decode_response(&bytes).unwrap().records;
        assert_eq!(records[0], CaaRecord::issue(";"));
        assert_eq!(records[1], CaaRecord::issuewild("ca.example; account=1234"));
    }

    #[test]
    fn test_decode_tag_case_and_unknown_tags() {
        let bytes = response_with(vec![
            raw_caa(b"\x00\x05ISSUEca1.example"),
            raw_caa(b"\x80\x0ccontactemailsecurity@example.com"),
        ]);

        let records = decode_response(&bytes).unwrap().records;
        assert_eq!(records[0].tag, CaaTag::Issue);
        assert!(records[1].issuer_critical);
        assert_eq!(records[1].tag, CaaTag::Other("contactemail".into()));
        assert_eq!(records[1].value, "security@example.com");
    }

    #[test]
    fn test_decode_truncated_rdata_still_counts() {
        let bytes = response_with(vec![raw_caa(b"\x00\x09iss")]);

        let records = decode_response(&bytes).unwrap().records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tag, CaaTag::Other(String::new()));
    }

    #[test]
    fn test_decode_skips_other_record_types() {
        let cname = Record::from_rdata(
            Name::from_ascii("www.example.com.").unwrap(),
            300,
            RData::CNAME(hickory_resolver::proto::rr::rdata::CNAME(
                Name::from_ascii("example.com.").unwrap(),
            )),
        );
        let bytes = response_with(vec![cname, raw_caa(b"\x00\x05issueca1.example")]);

        let records = decode_response(&bytes).unwrap().records;
        assert_eq!(records, vec![CaaRecord::issue("ca1.example")]);
    }

    #[test]
    fn test_decode_rejects_broken_framing() {
        let bytes = response_with(vec![raw_caa(b"\x00\x05issueca1.example")]);
        assert!(decode_response(&bytes[..bytes.len() - 3]).is_err());
        assert!(decode_response(&[0x12]).is_err());
    }

    #[test]
    fn test_decode_rejects_queries() {
        let bytes = build_query(1, "example.com").unwrap();
        assert!(decode_response(&bytes).is_err());
    }

    #[test]
    fn test_rcode_names() {
        assert_eq!(rcode_name(ResponseCode::NXDomain), "NXDOMAIN");
        assert_eq!(rcode_name(ResponseCode::ServFail), "SERVFAIL");
        assert_eq!(rcode_name(ResponseCode::Refused), "REFUSED");
        assert_eq!(rcode_name(ResponseCode::Unknown(3841)), "RCODE3841");
    }
}
