//! Dispatch code emission.
//!
//! Turns extracted method metadata into the source text of a dispatch
//! module: one response-envelope struct per method, one handler per method,
//! and one exact-path `dispatch` function per receiver. The whole output is
//! built as a single string; callers write it to disk in one step so a
//! failed run never leaves partial output behind.
//!
//! The generated module is meant to be declared as a sibling of the scanned
//! source (it opens with `use super::*;`), mirroring where the scanned
//! receiver and record types live.

use crate::extract::AnnotatedMethod;
use indexmap::IndexMap;
use thiserror::Error;

/// Configuration-class failure that aborts emission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// A route declared a verb outside `GET`/`POST`.
    #[error("method `{receiver}.{method}` declares unsupported verb `{verb}`")]
    UnsupportedVerb {
        /// The receiver type.
        receiver: String,
        /// The method name.
        method: String,
        /// The offending verb.
        verb: String,
    },

    /// A routed method's signature lacks a parameter or result type.
    #[error("method `{receiver}.{method}` is missing a parameter or result type")]
    IncompleteSignature {
        /// The receiver type.
        receiver: String,
        /// The method name.
        method: String,
    },
}

/// Emits the dispatch module for the extracted methods.
///
/// Receivers and methods are emitted in map order. Methods with zero-valued
/// routing metadata (malformed annotations) are skipped with a warning;
/// emitting a handler nothing can route to would only hide the data-quality
/// problem.
pub fn emit(methods: &IndexMap<String, Vec<AnnotatedMethod>>) -> Result<String, EmitError> {
    let mut out = String::new();
    out.push_str("// Code generated by daedalus-codegen. DO NOT EDIT.\n\n");
    out.push_str(
        "use daedalus::core::{write_error, write_json, ApiError, ApiRequest, ApiResponse};\n",
    );
    out.push_str("use daedalus::decode::{decode, ParameterBag};\n");
    out.push_str("use http::{Method, StatusCode};\n");
    out.push_str("use serde::Serialize;\n\n");
    out.push_str("use super::*;\n\n");

    for (receiver, all) in methods {
        let routed: Vec<&AnnotatedMethod> = all
            .iter()
            .filter(|method| {
                if method.is_zero() {
                    tracing::warn!(
                        receiver = %receiver,
                        method = %method.name,
                        "skipping method with zero-valued routing metadata"
                    );
                    false
                } else {
                    true
                }
            })
            .collect();

        if routed.is_empty() {
            continue;
        }

        for method in &routed {
            validate(method)?;
            emit_envelope(&mut out, method);
        }
        emit_impl(&mut out, receiver, &routed);
    }

    Ok(out)
}

fn validate(method: &AnnotatedMethod) -> Result<(), EmitError> {
    if method.http_verb != "GET" && method.http_verb != "POST" {
        return Err(EmitError::UnsupportedVerb {
            receiver: method.receiver.clone(),
            method: method.name.clone(),
            verb: method.http_verb.clone(),
        });
    }
    if method.param_type.is_empty() || method.result_type.is_empty() {
        return Err(EmitError::IncompleteSignature {
            receiver: method.receiver.clone(),
            method: method.name.clone(),
        });
    }
    Ok(())
}

fn emit_envelope(out: &mut String, method: &AnnotatedMethod) {
    out.push_str(&format!(
        "#[derive(Serialize)]\n\
         struct {envelope} {{\n\
         \x20   error: String,\n\
         \x20   #[serde(skip_serializing_if = \"Option::is_none\")]\n\
         \x20   response: Option<{result}>,\n\
         }}\n\n",
        envelope = envelope_name(&method.name),
        result = method.result_type,
    ));
}

fn emit_impl(out: &mut String, receiver: &str, methods: &[&AnnotatedMethod]) {
    out.push_str(&format!("impl {receiver} {{\n"));
    for method in methods {
        emit_handler(out, method);
    }
    emit_dispatch(out, methods);
    out.push_str("}\n\n");
}

fn emit_handler(out: &mut String, method: &AnnotatedMethod) {
    out.push_str(&format!(
        "    fn {handler}(&self, req: &ApiRequest) -> ApiResponse {{\n",
        handler = handler_name(&method.name)
    ));

    if method.http_verb == "POST" {
        out.push_str("        if req.method() != Method::POST {\n");
        out.push_str("            return write_error(&ApiError::not_acceptable(\"bad method\"));\n");
        out.push_str("        }\n");
    }
    if method.requires_auth {
        out.push_str("        if req.header(\"X-Auth\") != Some(\"100500\") {\n");
        out.push_str("            return write_error(&ApiError::forbidden(\"unauthorized\"));\n");
        out.push_str("        }\n");
    }

    let bag_source = if method.http_verb == "POST" {
        "ParameterBag::from_body(req.body())"
    } else {
        "ParameterBag::from_query(req.query_string().unwrap_or(\"\"))"
    };
    out.push_str(&format!("        let bag = match {bag_source} {{\n"));
    out.push_str("            Ok(bag) => bag,\n");
    out.push_str("            Err(err) => return write_error(&err),\n");
    out.push_str("        };\n");

    out.push_str(&format!(
        "        let params = match decode::<{param}>(&bag) {{\n",
        param = method.param_type
    ));
    out.push_str("            Ok(params) => params,\n");
    out.push_str("            Err(err) => return write_error(&err),\n");
    out.push_str("        };\n");

    out.push_str(&format!(
        "        match self.{name}(&req.context(), params) {{\n",
        name = method.name
    ));
    out.push_str(&format!(
        "            Ok(result) => write_json(\n\
         \x20               StatusCode::OK,\n\
         \x20               &{envelope} {{\n\
         \x20                   error: String::new(),\n\
         \x20                   response: Some(result),\n\
         \x20               }},\n\
         \x20           ),\n",
        envelope = envelope_name(&method.name)
    ));
    out.push_str("            Err(err) => write_error(&err),\n");
    out.push_str("        }\n");
    out.push_str("    }\n\n");
}

fn emit_dispatch(out: &mut String, methods: &[&AnnotatedMethod]) {
    out.push_str("    /// Routes a request to the handler declared for its exact path.\n");
    out.push_str("    pub fn dispatch(&self, req: &ApiRequest) -> ApiResponse {\n");
    out.push_str("        match req.path() {\n");
    for method in methods {
        out.push_str(&format!(
            "            \"{route}\" => self.{handler}(req),\n",
            route = method.route,
            handler = handler_name(&method.name)
        ));
    }
    out.push_str("            _ => write_error(&ApiError::not_found(\"unknown method\")),\n");
    out.push_str("        }\n");
    out.push_str("    }\n");
}

fn handler_name(method: &str) -> String {
    format!("handle_{method}")
}

fn envelope_name(method: &str) -> String {
    format!("{}Response", pascal_case(method))
}

fn pascal_case(s: &str) -> String {
    s.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(
        receiver: &str,
        name: &str,
        route: &str,
        verb: &str,
        auth: bool,
    ) -> AnnotatedMethod {
        AnnotatedMethod {
            receiver: receiver.to_string(),
            name: name.to_string(),
            route: route.to_string(),
            http_verb: verb.to_string(),
            requires_auth: auth,
            param_type: format!("{}Params", pascal_case(name)),
            result_type: "User".to_string(),
        }
    }

    fn sample() -> IndexMap<String, Vec<AnnotatedMethod>> {
        let mut methods = IndexMap::new();
        methods.insert(
            "MyApi".to_string(),
            vec![
                method("MyApi", "profile", "/user/profile", "GET", false),
                method("MyApi", "create", "/user/create", "POST", true),
            ],
        );
        methods
    }

    #[test]
    fn test_emitted_module_is_valid_rust() {
        let generated = emit(&sample()).unwrap();
        syn::parse_file(&generated).expect("generated module parses");
    }

    #[test]
    fn test_dispatch_matches_each_route_with_404_fallback() {
        let generated = emit(&sample()).unwrap();
        assert!(generated.contains("pub fn dispatch(&self, req: &ApiRequest) -> ApiResponse"));
        assert!(generated.contains(r#""/user/profile" => self.handle_profile(req),"#));
        assert!(generated.contains(r#""/user/create" => self.handle_create(req),"#));
        assert!(generated.contains(r#"write_error(&ApiError::not_found("unknown method"))"#));
    }

    #[test]
    fn test_post_handler_guards_verb_and_auth() {
        let generated = emit(&sample()).unwrap();
        let create = generated
            .split("fn handle_create")
            .nth(1)
            .expect("create handler emitted");
        let create = create.split("fn ").next().unwrap_or(create);
        assert!(create.contains("req.method() != Method::POST"));
        assert!(create.contains(r#"ApiError::not_acceptable("bad method")"#));
        assert!(create.contains(r#"req.header("X-Auth") != Some("100500")"#));
        assert!(create.contains("ParameterBag::from_body(req.body())"));
    }

    #[test]
    fn test_get_handler_reads_query_without_verb_guard() {
        let generated = emit(&sample()).unwrap();
        let profile = generated
            .split("fn handle_profile")
            .nth(1)
            .expect("profile handler emitted");
        let profile = profile.split("fn ").next().unwrap_or(profile);
        assert!(profile.contains("ParameterBag::from_query(req.query_string()"));
        assert!(!profile.contains("Method::POST"));
        assert!(!profile.contains("X-Auth"));
    }

    #[test]
    fn test_auth_guard_is_emitted_on_get_routes_too() {
        let mut methods = IndexMap::new();
        methods.insert(
            "MyApi".to_string(),
            vec![method("MyApi", "profile", "/user/profile", "GET", true)],
        );
        let generated = emit(&methods).unwrap();
        assert!(generated.contains(r#"req.header("X-Auth") != Some("100500")"#));
    }

    #[test]
    fn test_envelope_struct_per_method() {
        let generated = emit(&sample()).unwrap();
        assert!(generated.contains("struct ProfileResponse"));
        assert!(generated.contains("struct CreateResponse"));
        assert!(generated.contains(r#"#[serde(skip_serializing_if = "Option::is_none")]"#));
        assert!(generated.contains("response: Option<User>,"));
    }

    #[test]
    fn test_zero_valued_methods_are_skipped() {
        let mut methods = sample();
        methods
            .get_mut("MyApi")
            .unwrap()
            .push(AnnotatedMethod {
                receiver: "MyApi".to_string(),
                name: "broken".to_string(),
                ..AnnotatedMethod::default()
            });
        let generated = emit(&methods).unwrap();
        assert!(!generated.contains("handle_broken"));
    }

    #[test]
    fn test_unsupported_verb_aborts_emission() {
        let mut methods = IndexMap::new();
        methods.insert(
            "MyApi".to_string(),
            vec![method("MyApi", "update", "/user/update", "PUT", false)],
        );
        let err = emit(&methods).unwrap_err();
        assert_eq!(
            err,
            EmitError::UnsupportedVerb {
                receiver: "MyApi".to_string(),
                method: "update".to_string(),
                verb: "PUT".to_string(),
            }
        );
    }

    #[test]
    fn test_incomplete_signature_aborts_emission() {
        let mut incomplete = method("MyApi", "profile", "/user/profile", "GET", false);
        incomplete.param_type = String::new();
        let mut methods = IndexMap::new();
        methods.insert("MyApi".to_string(), vec![incomplete]);
        let err = emit(&methods).unwrap_err();
        assert!(matches!(err, EmitError::IncompleteSignature { .. }));
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("profile"), "Profile");
        assert_eq!(pascal_case("create_user"), "CreateUser");
        assert_eq!(pascal_case("full-name"), "FullName");
    }
}
