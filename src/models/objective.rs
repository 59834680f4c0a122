/// Function to minimize. Lower values are better.
///
/// Implemented for closures of the shape `Fn(&[f64]) -> anyhow::Result<f64>`.
/// Closures returning a plain `f64` can be wrapped with [`infallible`], and
/// closures taking fixed trailing arguments with [`with_args`].
pub trait Objective {
    fn evaluate(&self, parameters: &[f64]) -> Result<f64, anyhow::Error>;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> Result<f64, anyhow::Error>,
{
    fn evaluate(&self, parameters: &[f64]) -> Result<f64, anyhow::Error> {
        self(parameters)
    }
}

/// Objective that cannot fail.
pub struct Infallible<F> {
    function: F,
}

impl<F> Objective for Infallible<F>
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, parameters: &[f64]) -> Result<f64, anyhow::Error> {
        Ok((self.function)(parameters))
    }
}

pub fn infallible<F>(function: F) -> Infallible<F>
where
    F: Fn(&[f64]) -> f64,
{
    Infallible { function }
}

/// Helper that pins down the closure signature, so `Ok(..)` infers without annotations.
pub fn fallible<F>(function: F) -> F
where
    F: Fn(&[f64]) -> Result<f64, anyhow::Error>,
{
    function
}

/// Objective with fixed extra arguments appended to every call.
pub struct WithArgs<F, A> {
    function: F,
    args: A,
}

impl<F, A> WithArgs<F, A> {
    pub fn args(&self) -> &A {
        &self.args
    }
}

impl<F, A> Objective for WithArgs<F, A>
where
    F: Fn(&[f64], &A) -> Result<f64, anyhow::Error>,
{
    fn evaluate(&self, parameters: &[f64]) -> Result<f64, anyhow::Error> {
        (self.function)(parameters, &self.args)
    }
}

/// Curries `args` into every call of `function`.
pub fn with_args<F, A>(function: F, args: A) -> WithArgs<F, A>
where
    F: Fn(&[f64], &A) -> Result<f64, anyhow::Error>,
{
    WithArgs { function, args }
}
