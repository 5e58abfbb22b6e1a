//! Method metadata extraction from a parsed source tree.
//!
//! A method qualifies when a leading doc-comment line starts with the
//! [`MARKER`] token followed by a JSON payload describing `url`, `method`,
//! and `auth`. The method's own name and the type names of its second
//! non-receiver parameter and first result are read from the signature; the
//! first non-receiver parameter is the ambient request context and is not
//! captured.

use indexmap::IndexMap;
use serde::Deserialize;
use syn::{Expr, ExprLit, FnArg, GenericArgument, ImplItem, Item, Lit, Meta, PathArguments, ReturnType, Type};

/// The marker token opening a route annotation line.
pub const MARKER: &str = "apigen:api";

/// Routing metadata for one annotated method.
///
/// Lives for a single generator invocation. A method whose payload failed to
/// decode is still registered, with zeroed routing metadata; downstream
/// consumers must guard against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedMethod {
    /// The receiver type the method is declared on.
    pub receiver: String,
    /// The method name.
    pub name: String,
    /// Exact request path the method serves.
    pub route: String,
    /// `GET` or `POST`; `GET` when the payload omits `method`.
    pub http_verb: String,
    /// Whether the handler must enforce the fixed auth header check.
    pub requires_auth: bool,
    /// Type name of the decoded parameter record.
    pub param_type: String,
    /// Type name of the business method's success result.
    pub result_type: String,
}

impl AnnotatedMethod {
    /// Returns `true` when the payload failed to decode and the routing
    /// metadata is unusable.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.route.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RoutePayload {
    url: String,
    #[serde(default)]
    method: String,
    #[serde(default)]
    auth: bool,
}

/// Collects annotated methods per receiver type, in source order.
///
/// Only inherent `impl` blocks are walked; trait impls and free functions
/// never carry route annotations. Malformed payloads are reported on the
/// diagnostic stream and registered as zero-valued metadata rather than
/// aborting the walk.
#[must_use]
pub fn extract_methods(file: &syn::File) -> IndexMap<String, Vec<AnnotatedMethod>> {
    let mut methods: IndexMap<String, Vec<AnnotatedMethod>> = IndexMap::new();

    for item in &file.items {
        let Item::Impl(item_impl) = item else { continue };
        if item_impl.trait_.is_some() {
            continue;
        }
        let Some(receiver) = type_name(&item_impl.self_ty) else {
            continue;
        };

        for impl_item in &item_impl.items {
            let ImplItem::Fn(method) = impl_item else { continue };
            let Some(payload) = marker_payload(&method.attrs) else {
                continue;
            };

            let name = method.sig.ident.to_string();
            let annotated = match serde_json::from_str::<RoutePayload>(&payload) {
                Ok(route) => AnnotatedMethod {
                    receiver: receiver.clone(),
                    name,
                    route: route.url,
                    http_verb: if route.method.is_empty() {
                        "GET".to_string()
                    } else {
                        route.method
                    },
                    requires_auth: route.auth,
                    param_type: second_param_type(&method.sig),
                    result_type: ok_result_type(&method.sig),
                },
                Err(err) => {
                    tracing::warn!(
                        receiver = %receiver,
                        method = %name,
                        %err,
                        "malformed route annotation, registering zero-valued metadata"
                    );
                    AnnotatedMethod {
                        receiver: receiver.clone(),
                        name,
                        ..AnnotatedMethod::default()
                    }
                }
            };

            methods.entry(receiver.clone()).or_default().push(annotated);
        }
    }

    methods
}

/// Returns the payload following the marker on the first matching doc line.
fn marker_payload(attrs: &[syn::Attribute]) -> Option<String> {
    for attr in attrs {
        let Meta::NameValue(nv) = &attr.meta else { continue };
        if !nv.path.is_ident("doc") {
            continue;
        }
        let Expr::Lit(ExprLit {
            lit: Lit::Str(line), ..
        }) = &nv.value
        else {
            continue;
        };

        let line = line.value();
        let line = line.trim_start();
        if let Some(payload) = line.strip_prefix(MARKER) {
            return Some(payload.trim().to_string());
        }
    }
    None
}

/// Last path-segment name of a type, seeing through references.
fn type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(path) => path.path.segments.last().map(|s| s.ident.to_string()),
        Type::Reference(reference) => type_name(&reference.elem),
        _ => None,
    }
}

/// Type name of the second non-receiver parameter, empty when absent.
fn second_param_type(sig: &syn::Signature) -> String {
    sig.inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(pat) => Some(&*pat.ty),
            FnArg::Receiver(_) => None,
        })
        .nth(1)
        .and_then(type_name)
        .unwrap_or_default()
}

/// Type name of the declared success result: the `Ok` type for `Result`
/// returns, the bare type otherwise, empty when the method returns nothing.
fn ok_result_type(sig: &syn::Signature) -> String {
    let ReturnType::Type(_, ty) = &sig.output else {
        return String::new();
    };

    if let Type::Path(path) = &**ty {
        if let Some(segment) = path.path.segments.last() {
            if segment.ident == "Result" {
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(GenericArgument::Type(ok)) = args.args.first() {
                        return type_name(ok).unwrap_or_default();
                    }
                }
            }
        }
    }

    type_name(ty).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
use daedalus::core::{ApiError, RequestContext};

pub struct MyApi;

impl MyApi {
    /// apigen:api {"url": "/user/profile", "auth": false}
    pub fn profile(&self, ctx: &RequestContext, params: ProfileParams) -> Result<User, ApiError> {
        todo!()
    }

    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(&self, ctx: &RequestContext, params: CreateParams) -> Result<NewUser, ApiError> {
        todo!()
    }

    /// A plain doc comment, not an annotation.
    pub fn helper(&self) {}
}

pub struct OtherApi;

impl OtherApi {
    /// apigen:api {"url": 42}
    pub fn broken(&self, ctx: &RequestContext, params: BrokenParams) -> Result<User, ApiError> {
        todo!()
    }
}

impl Clone for MyApi {
    fn clone(&self) -> Self {
        MyApi
    }
}

/// apigen:api {"url": "/free", "method": "GET"}
pub fn free_function() {}
"#;

    fn fixture() -> IndexMap<String, Vec<AnnotatedMethod>> {
        let file = syn::parse_file(FIXTURE).expect("fixture parses");
        extract_methods(&file)
    }

    #[test]
    fn test_annotated_methods_are_collected_per_receiver() {
        let methods = fixture();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods["MyApi"].len(), 2);
        assert_eq!(methods["OtherApi"].len(), 1);
    }

    #[test]
    fn test_route_metadata_is_decoded() {
        let methods = fixture();
        let create = &methods["MyApi"][1];
        assert_eq!(create.name, "create");
        assert_eq!(create.route, "/user/create");
        assert_eq!(create.http_verb, "POST");
        assert!(create.requires_auth);
    }

    #[test]
    fn test_method_defaults_to_get() {
        let methods = fixture();
        let profile = &methods["MyApi"][0];
        assert_eq!(profile.http_verb, "GET");
        assert!(!profile.requires_auth);
    }

    #[test]
    fn test_signature_types_are_captured() {
        let methods = fixture();
        let profile = &methods["MyApi"][0];
        assert_eq!(profile.param_type, "ProfileParams");
        assert_eq!(profile.result_type, "User");

        let create = &methods["MyApi"][1];
        assert_eq!(create.param_type, "CreateParams");
        assert_eq!(create.result_type, "NewUser");
    }

    #[test]
    fn test_malformed_payload_registers_zero_metadata() {
        let methods = fixture();
        let broken = &methods["OtherApi"][0];
        assert!(broken.is_zero());
        assert_eq!(broken.receiver, "OtherApi");
        assert_eq!(broken.name, "broken");
        assert_eq!(broken.param_type, "");
    }

    #[test]
    fn test_plain_doc_comments_and_free_functions_are_skipped() {
        let methods = fixture();
        assert!(methods["MyApi"].iter().all(|m| m.name != "helper"));
        assert!(methods.values().flatten().all(|m| m.name != "free_function"));
    }

    #[test]
    fn test_trait_impls_are_skipped() {
        let methods = fixture();
        assert!(methods.values().flatten().all(|m| m.name != "clone"));
    }
}
