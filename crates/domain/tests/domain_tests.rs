//! Payload validation scenarios across the payment types.

#![allow(clippy::unwrap_used, clippy::panic)]

use mpesa_domain::{
    B2cCommand, B2cPaymentRequest, DomainError, ReferenceItem, StkPushPayload, TransactionType,
    stk_password,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn stk_payload() -> StkPushPayload {
    StkPushPayload {
        merchant_request_id: "SFC-Testing-9146-4216-9455-e3947ac570fc".to_string(),
        business_short_code: "554433".to_string(),
        password: stk_password("554433", "passkey", "20240918055823"),
        timestamp: "20240918055823".to_string(),
        transaction_type: TransactionType::CustomerPayBillOnline,
        amount: dec!(20),
        party_a: "251700404709".to_string(),
        party_b: 554_433,
        phone_number: "251700404709".to_string(),
        transaction_desc: "Payment test".to_string(),
        callback_url: "https://www.myservice:8080/result".to_string(),
        account_reference: "DATA".to_string(),
        reference_data: vec![ReferenceItem::new("ThirdPartyReference", "Ref-12345")],
    }
}

fn b2c_request() -> B2cPaymentRequest {
    B2cPaymentRequest {
        initiator_name: "testapi".to_string(),
        security_credential: "c2VjcmV0".to_string(),
        command_id: B2cCommand::BusinessPayment,
        amount: dec!(12.50),
        party_a: 101_010,
        party_b: "251700100150".to_string(),
        remarks: "Test B2C".to_string(),
        queue_timeout_url: "https://mydomain.com/b2c/timeout".to_string(),
        result_url: "https://mydomain.com/b2c/result".to_string(),
        occasion: None,
    }
}

fn rejected_field(result: Result<(), DomainError>) -> &'static str {
    match result {
        Err(DomainError::InvalidField { field, .. }) => field,
        other => panic!("expected InvalidField, got {other:?}"),
    }
}

#[test]
fn test_valid_stk_payload_passes() {
    assert!(stk_payload().validate().is_ok());
}

#[test]
fn test_stk_payload_serializes_wire_names() {
    let value = serde_json::to_value(stk_payload()).unwrap();
    assert_eq!(value["MerchantRequestID"], "SFC-Testing-9146-4216-9455-e3947ac570fc");
    assert_eq!(value["BusinessShortCode"], "554433");
    assert_eq!(value["TransactionType"], "CustomerPayBillOnline");
    assert_eq!(value["PartyB"], 554_433);
    assert_eq!(value["CallBackURL"], "https://www.myservice:8080/result");
    assert_eq!(value["ReferenceData"][0]["Key"], "ThirdPartyReference");
    assert!(value["Amount"].is_number());
}

#[test]
fn test_stk_payload_rejects_each_bad_field() {
    let mut p = stk_payload();
    p.business_short_code = "12345".to_string();
    assert_eq!(rejected_field(p.validate()), "BusinessShortCode");

    let mut p = stk_payload();
    p.timestamp = "2024091805582".to_string();
    assert_eq!(rejected_field(p.validate()), "Timestamp");

    let mut p = stk_payload();
    p.amount = dec!(0);
    assert_eq!(rejected_field(p.validate()), "Amount");

    let mut p = stk_payload();
    p.party_a = "0700404709".to_string();
    assert_eq!(rejected_field(p.validate()), "PartyA");

    let mut p = stk_payload();
    p.party_b = 1_234;
    assert_eq!(rejected_field(p.validate()), "PartyB");

    let mut p = stk_payload();
    p.phone_number = "25170040470".to_string();
    assert_eq!(rejected_field(p.validate()), "PhoneNumber");

    let mut p = stk_payload();
    p.transaction_desc = "Fourteen chars".to_string();
    assert_eq!(rejected_field(p.validate()), "TransactionDesc");

    let mut p = stk_payload();
    p.callback_url = "callback".to_string();
    assert_eq!(rejected_field(p.validate()), "CallBackURL");

    let mut p = stk_payload();
    p.account_reference = "ThirteenChars".to_string();
    assert_eq!(rejected_field(p.validate()), "AccountReference");

    let mut p = stk_payload();
    p.password = String::new();
    assert_eq!(rejected_field(p.validate()), "Password");
}

#[test]
fn test_stk_payload_rejects_unknown_transaction_type() {
    let mut value = serde_json::to_value(stk_payload()).unwrap();
    value["TransactionType"] = serde_json::json!("CustomerPayOffline");
    assert!(serde_json::from_value::<StkPushPayload>(value).is_err());
}

#[test]
fn test_valid_b2c_request_passes() {
    assert!(b2c_request().validate().is_ok());
}

#[test]
fn test_b2c_zero_amount_is_allowed() {
    let mut req = b2c_request();
    req.amount = dec!(0);
    assert!(req.validate().is_ok());
}

#[test]
fn test_b2c_rejects_each_bad_field() {
    let mut r = b2c_request();
    r.amount = dec!(-1);
    assert_eq!(rejected_field(r.validate()), "Amount");

    let mut r = b2c_request();
    r.initiator_name = " ".to_string();
    assert_eq!(rejected_field(r.validate()), "InitiatorName");

    let mut r = b2c_request();
    r.party_a = 99;
    assert_eq!(rejected_field(r.validate()), "PartyA");

    let mut r = b2c_request();
    r.party_b = "251800100150".to_string();
    assert_eq!(rejected_field(r.validate()), "PartyB");

    let mut r = b2c_request();
    r.remarks = "x".repeat(101);
    assert_eq!(rejected_field(r.validate()), "Remarks");

    let mut r = b2c_request();
    r.result_url = "mailto:ops@mydomain.com".to_string();
    assert_eq!(rejected_field(r.validate()), "ResultURL");

    let mut r = b2c_request();
    r.occasion = Some("y".repeat(101));
    assert_eq!(rejected_field(r.validate()), "Occassion");
}

#[test]
fn test_b2c_serializes_provider_spelling() {
    let mut req = b2c_request();
    req.occasion = Some("Payday".to_string());
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["Occassion"], "Payday");
    assert_eq!(value["CommandID"], "BusinessPayment");
    assert_eq!(value["QueueTimeOutURL"], "https://mydomain.com/b2c/timeout");

    let without = serde_json::to_value(b2c_request()).unwrap();
    assert!(without.get("Occassion").is_none());
}
