use std::marker::PhantomData;

use crate::context::Context;
use crate::env::process_environ;
use crate::error::ArgumentError;
use crate::field::{Arguments, descriptors};
use crate::print::print_lines;
use crate::resolve::{self, ResolveInput};
use crate::validate::{check_hooks, check_required};

const FALLBACK_PROGRAM_NAME: &str = "argument";

/// Entry point for building an argument resolution.
pub struct Argument;

impl Argument {
    pub fn builder<C: Arguments>() -> ArgumentBuilder<C> {
        ArgumentBuilder::new()
    }
}

/// Builder for configuring and running a resolution.
///
/// By default both the process arguments and the process environment are
/// read, and both validation passes run after filling. Every source can be
/// replaced with synthetic data, which is how the tests drive it.
pub struct ArgumentBuilder<C: Arguments> {
    program_name: Option<String>,
    args: Option<Vec<String>>,
    args_enabled: bool,
    env_vars: Option<Vec<String>>,
    env_enabled: bool,
    print: bool,
    validate: bool,
    ctx: Context,
    _phantom: PhantomData<C>,
}

impl<C: Arguments> ArgumentBuilder<C> {
    fn new() -> Self {
        Self {
            program_name: None,
            args: None,
            args_enabled: true,
            env_vars: None,
            env_enabled: true,
            print: false,
            validate: true,
            ctx: Context::background(),
            _phantom: PhantomData,
        }
    }

    /// Program name for command-line errors (default: the binary's file name).
    pub fn program_name(mut self, name: &str) -> Self {
        self.program_name = Some(name.to_string());
        self
    }

    /// Use this argument vector instead of the process arguments. It must
    /// not include the binary name.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Use these `NAME=value` entries instead of the process environment.
    pub fn env_vars<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.env_vars = Some(vars.into_iter().map(Into::into).collect());
        self
    }

    /// Skip the command line entirely.
    pub fn no_args(mut self) -> Self {
        self.args_enabled = false;
        self
    }

    /// Skip the environment entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Log the resolved values before validation (default: `false`).
    pub fn print(mut self, print: bool) -> Self {
        self.print = print;
        self
    }

    /// Run the presence and semantic passes after filling (default: `true`).
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Context handed to validation hooks.
    pub fn context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    fn effective_program_name(&self) -> String {
        if let Some(name) = &self.program_name {
            return name.clone();
        }
        std::env::args()
            .next()
            .and_then(|arg0| {
                std::path::Path::new(&arg0)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| FALLBACK_PROGRAM_NAME.to_string())
    }

    fn effective_args(&self) -> Option<Vec<String>> {
        if !self.args_enabled {
            return None;
        }
        if let Some(args) = &self.args {
            return Some(args.clone());
        }
        Some(std::env::args().skip(1).collect())
    }

    fn effective_env_vars(&self) -> Option<Vec<String>> {
        if !self.env_enabled {
            return None;
        }
        if let Some(vars) = &self.env_vars {
            return Some(vars.clone());
        }
        Some(process_environ())
    }

    /// Build the `ResolveInput` from current builder state.
    fn build_input(&self) -> ResolveInput {
        ResolveInput {
            program_name: self.effective_program_name(),
            args: self.effective_args(),
            env_vars: self.effective_env_vars(),
        }
    }

    /// Resolve into an existing target. Fields no source supplies keep their
    /// current value.
    pub fn load_into(self, target: &mut C) -> Result<(), ArgumentError> {
        resolve::resolve(self.build_input(), target)?;

        let fields = descriptors::<C>();
        if self.print {
            print_lines(&fields, target);
        }
        if self.validate {
            check_required(&fields, target)?;
            check_hooks(&self.ctx, &fields, target)?;
        }
        Ok(())
    }

    /// Resolve into a fresh `C::default()`.
    pub fn load(self) -> Result<C, ArgumentError>
    where
        C: Default,
    {
        let mut target = C::default();
        self.load_into(&mut target)?;
        Ok(target)
    }
}
