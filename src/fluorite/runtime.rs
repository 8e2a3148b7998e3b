//! Runtime value model.
//!
//!     The code-generation stage downstream of this crate consumes the
//!     syntax tree together with these value types: atoms, modules,
//!     functions, integers. The front end never calls into them — they are
//!     the contract its output must satisfy — but they live here so the
//!     whole interface is in one place.
//!
//!     An atom's identity is derived from its content: the SHA-256 digest
//!     of the fully-constructed (dotted) name. The digest is computed in
//!     the constructor, after the name exists, so identity and name can
//!     never disagree.

use std::collections::BTreeMap;
use std::fmt;

use num_bigint::BigInt;
use sha2::{Digest, Sha256};

/// An interned-style name. Equality is by name; `identity` is the
/// content-derived digest.
#[derive(Debug, Clone)]
pub struct Atom {
    name: String,
    path: Vec<String>,
    id: [u8; 32],
}

impl Atom {
    pub fn new(name: impl Into<String>) -> Atom {
        Atom::qualified(Vec::new(), name)
    }

    /// An atom under a dotted path, e.g. `Math.Vec` as `["Math"]`, `"Vec"`.
    pub fn qualified(path: Vec<String>, name: impl Into<String>) -> Atom {
        let name = name.into();
        let full = full_name(&path, &name);
        let id = Sha256::digest(full.as_bytes()).into();
        Atom { name, path, id }
    }

    /// The final segment of the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The dotted name the identity digest covers.
    pub fn full_name(&self) -> String {
        full_name(&self.path, &self.name)
    }

    /// Content-derived identity.
    pub fn identity(&self) -> &[u8; 32] {
        &self.id
    }
}

fn full_name(path: &[String], name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path.join("."), name)
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Atom) -> bool {
        self.name == other.name && self.path == other.path
    }
}

impl Eq for Atom {}

impl std::hash::Hash for Atom {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write(&self.id);
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// A wrapped integer value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integer(BigInt);

impl Integer {
    pub fn new(value: impl Into<BigInt>) -> Integer {
        Integer(value.into())
    }

    pub fn value(&self) -> &BigInt {
        &self.0
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Atom(Atom),
    Integer(Integer),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Atom(atom) => write!(f, "{}", atom),
            Value::Integer(int) => write!(f, "{}", int),
        }
    }
}

/// The callable body of a function.
pub type FnBody = fn(&[Value]) -> Value;

/// Raised when a function is applied to the wrong number of arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArityError {
    pub expected: usize,
    pub got: usize,
}

impl fmt::Display for ArityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {} arguments, got {}", self.expected, self.got)
    }
}

impl std::error::Error for ArityError {}

/// A callable with a qualified name and a fixed arity.
#[derive(Debug, Clone)]
pub struct Function {
    module: Atom,
    symbol: Atom,
    arity: usize,
    body: FnBody,
}

impl Function {
    pub fn new(module: Atom, symbol: Atom, arity: usize, body: FnBody) -> Function {
        Function {
            module,
            symbol,
            arity,
            body,
        }
    }

    pub fn qual_name(&self) -> String {
        format!("{}.{}", self.module, self.symbol)
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn invoke(&self, args: &[Value]) -> Result<Value, ArityError> {
        if args.len() != self.arity {
            return Err(ArityError {
                expected: self.arity,
                got: args.len(),
            });
        }
        Ok((self.body)(args))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.qual_name(), self.arity)
    }
}

/// A named container of callables, keyed by symbol name and arity.
#[derive(Debug, Clone, Default)]
pub struct Module {
    name: Option<Atom>,
    functions: BTreeMap<(String, usize), Function>,
}

impl Module {
    pub fn new(name: Atom) -> Module {
        Module {
            name: Some(name),
            functions: BTreeMap::new(),
        }
    }

    pub fn pretty_name(&self) -> String {
        self.name
            .as_ref()
            .map(Atom::full_name)
            .unwrap_or_default()
    }

    pub fn register(&mut self, function: Function) {
        let key = (function.symbol.name().to_string(), function.arity);
        self.functions.insert(key, function);
    }

    pub fn lookup(&self, symbol: &str, arity: usize) -> Option<&Function> {
        self.functions.get(&(symbol.to_string(), arity))
    }
}
