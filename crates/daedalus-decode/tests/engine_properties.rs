//! Property tests for the engine's boundary behavior.

use daedalus_decode::{decode, ParameterBag};
use daedalus_schema::{ApiRecord, FieldDecl, FieldKind, FieldMut};
use proptest::prelude::*;

#[derive(Debug, Default)]
struct SignupParams {
    login: String,
    age: i64,
    status: String,
}

impl ApiRecord for SignupParams {
    fn fields() -> &'static [FieldDecl] {
        const FIELDS: &[FieldDecl] = &[
            FieldDecl::new("Login", FieldKind::Str, "required,min=2,max=16"),
            FieldDecl::new("Age", FieldKind::Int, "min=0,max=128"),
            FieldDecl::new(
                "Status",
                FieldKind::Str,
                "enum=user|moderator|admin,default=user",
            ),
        ];
        FIELDS
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        match name {
            "Login" => Some(FieldMut::Str(&mut self.login)),
            "Age" => Some(FieldMut::Int(&mut self.age)),
            "Status" => Some(FieldMut::Str(&mut self.status)),
            _ => None,
        }
    }
}

proptest! {
    #[test]
    fn in_bounds_bags_always_decode(login in "[a-z0-9]{2,16}", age in 0i64..=128) {
        let mut bag = ParameterBag::new();
        bag.append("login", login.as_str());
        bag.append("age", age.to_string());

        let params: SignupParams = decode(&bag).unwrap();
        prop_assert_eq!(params.login, login);
        prop_assert_eq!(params.age, age);
        prop_assert_eq!(params.status, "user");
    }

    #[test]
    fn ages_above_max_are_rejected(login in "[a-z0-9]{2,16}", age in 129i64..100_000) {
        let mut bag = ParameterBag::new();
        bag.append("login", login.as_str());
        bag.append("age", age.to_string());

        let err = decode::<SignupParams>(&bag).unwrap_err();
        prop_assert_eq!(err.message(), "age must be <= 128");
    }

    #[test]
    fn logins_past_the_length_bound_are_rejected(login in "[a-z0-9]{17,32}") {
        let mut bag = ParameterBag::new();
        bag.append("login", login.as_str());

        let err = decode::<SignupParams>(&bag).unwrap_err();
        prop_assert_eq!(err.message(), "login len must be <= 16");
    }

    #[test]
    fn multi_valued_parameters_are_always_rejected(
        values in proptest::collection::vec("[a-z]{1,8}", 2..5)
    ) {
        let mut bag = ParameterBag::new();
        for value in &values {
            bag.append("login", value.as_str());
        }

        let err = decode::<SignupParams>(&bag).unwrap_err();
        prop_assert_eq!(err.message(), "query value must be equal 1");
    }

    #[test]
    fn non_member_statuses_are_rejected(status in "[a-z]{1,8}") {
        prop_assume!(!["user", "moderator", "admin"].contains(&status.as_str()));

        let mut bag = ParameterBag::new();
        bag.append("login", "i0");
        bag.append("status", status.as_str());

        let err = decode::<SignupParams>(&bag).unwrap_err();
        prop_assert_eq!(err.message(), "status must be one of [user, moderator, admin]");
    }
}
