//! Field metadata: the declarative description of each configuration slot.
//!
//! A configuration struct implements [`Arguments`] and lists its fields. Each
//! [`Field`] carries an immutable [`FieldDescriptor`] (names, default text,
//! required flag, separator, display mode, usage) plus a typed accessor used
//! to assign resolved values directly onto the struct.

use std::any::type_name;
use std::marker::PhantomData;

use crate::error::FillError;
use crate::types::{DisplayMode, SemanticType, Value};
use crate::value::{FieldValue, Validate};

/// A configuration target.
///
/// ```ignore
/// #[derive(Default)]
/// struct Config {
///     host: String,
///     port: u16,
/// }
///
/// impl Arguments for Config {
///     fn fields() -> Vec<Field<Self>> {
///         vec![
///             field!(host).arg("host").env("HOST").default("localhost"),
///             field!(port).arg("port").env("PORT").required(),
///         ]
///     }
/// }
/// ```
pub trait Arguments: Sized + 'static {
    fn fields() -> Vec<Field<Self>>;

    /// Validation hook of the whole target, run before any field hook.
    fn validator(&self) -> Option<&dyn Validate> {
        None
    }
}

/// Immutable metadata of one configuration field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    semantic_type: SemanticType,
    type_name: &'static str,
    arg: Option<String>,
    env: Option<String>,
    default: Option<String>,
    required: bool,
    separator: String,
    display: DisplayMode,
    usage: String,
}

impl FieldDescriptor {
    /// Identifier used as the key in every value map.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn semantic_type(&self) -> &SemanticType {
        &self.semantic_type
    }

    /// The Rust type name, for error messages.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn arg(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    pub fn env(&self) -> Option<&str> {
        self.env.as_deref()
    }

    /// Default text. `Some("")` is an explicit empty default.
    pub fn default_text(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn display(&self) -> DisplayMode {
        self.display
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Whether any source can supply a value for this field.
    pub fn is_bound(&self) -> bool {
        self.arg.is_some() || self.env.is_some() || self.default.is_some()
    }
}

/// Typed access to one slot of a target, with the field type erased.
trait Slot<C> {
    fn assign(&self, target: &mut C, value: Value) -> Result<(), FillError>;
    fn value(&self, target: &C) -> Value;
    fn validator<'a>(&self, target: &'a C) -> Option<&'a dyn Validate>;
    fn element_validators<'a>(&self, target: &'a C) -> Vec<&'a dyn Validate>;
}

struct Accessor<C, T> {
    get: fn(&C) -> &T,
    get_mut: fn(&mut C) -> &mut T,
    _phantom: PhantomData<fn(T)>,
}

impl<C, T: FieldValue> Slot<C> for Accessor<C, T> {
    fn assign(&self, target: &mut C, value: Value) -> Result<(), FillError> {
        *(self.get_mut)(target) = T::from_value(value)?;
        Ok(())
    }

    fn value(&self, target: &C) -> Value {
        (self.get)(target).to_value()
    }

    fn validator<'a>(&self, target: &'a C) -> Option<&'a dyn Validate> {
        (self.get)(target).validator()
    }

    fn element_validators<'a>(&self, target: &'a C) -> Vec<&'a dyn Validate> {
        (self.get)(target).element_validators()
    }
}

/// One configuration field: descriptor plus accessor.
pub struct Field<C> {
    descriptor: FieldDescriptor,
    slot: Box<dyn Slot<C>>,
}

impl<C: 'static> Field<C> {
    /// Describe a field by name and accessors. The [`field!`](crate::field)
    /// macro fills in the accessors for a struct member.
    pub fn new<T: FieldValue>(
        name: &'static str,
        get: fn(&C) -> &T,
        get_mut: fn(&mut C) -> &mut T,
    ) -> Self {
        Self {
            descriptor: FieldDescriptor {
                name,
                semantic_type: T::semantic_type(),
                type_name: type_name::<T>(),
                arg: None,
                env: None,
                default: None,
                required: false,
                separator: ",".to_string(),
                display: DisplayMode::Normal,
                usage: String::new(),
            },
            slot: Box::new(Accessor {
                get,
                get_mut,
                _phantom: PhantomData,
            }),
        }
    }

    /// Command-line flag name (without dashes).
    pub fn arg(mut self, name: &str) -> Self {
        self.descriptor.arg = Some(name.to_string());
        self
    }

    /// Environment variable name.
    pub fn env(mut self, name: &str) -> Self {
        self.descriptor.env = Some(name.to_string());
        self
    }

    /// Default text, parsed like any other source value.
    pub fn default(mut self, text: &str) -> Self {
        self.descriptor.default = Some(text.to_string());
        self
    }

    /// Reject the field's empty value after filling. Booleans are never
    /// empty. Dates and timestamps are empty at the Unix epoch, so a required
    /// temporal field cannot be set to `1970-01-01`.
    pub fn required(mut self) -> Self {
        self.descriptor.required = true;
        self
    }

    /// List separator (default: `,`).
    pub fn separator(mut self, separator: &str) -> Self {
        self.descriptor.separator = separator.to_string();
        self
    }

    pub fn display(mut self, display: DisplayMode) -> Self {
        self.descriptor.display = display;
        self
    }

    /// Help text for the command-line flag.
    pub fn usage(mut self, usage: &str) -> Self {
        self.descriptor.usage = usage.to_string();
        self
    }
}

impl<C> Field<C> {
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub(crate) fn assign(&self, target: &mut C, value: Value) -> Result<(), FillError> {
        self.slot.assign(target, value)
    }

    pub(crate) fn value(&self, target: &C) -> Value {
        self.slot.value(target)
    }

    pub(crate) fn validator<'a>(&self, target: &'a C) -> Option<&'a dyn Validate> {
        self.slot.validator(target)
    }

    pub(crate) fn element_validators<'a>(&self, target: &'a C) -> Vec<&'a dyn Validate> {
        self.slot.element_validators(target)
    }
}

/// Extract the ordered field list of a target.
pub fn descriptors<C: Arguments>() -> Vec<Field<C>> {
    C::fields()
}

/// Build a [`Field`] for a struct member.
///
/// `field!(port)` inside an `impl Arguments for Config` block, or
/// `field!(Config, port)` elsewhere.
#[macro_export]
macro_rules! field {
    ($member:ident) => {
        $crate::field!(Self, $member)
    };
    ($target:ty, $member:ident) => {
        $crate::Field::new(
            stringify!($member),
            |c: &$target| &c.$member,
            |c: &mut $target| &mut c.$member,
        )
    };
}
