use crate::{Error, Result};

/// Physical constants of an airframe.
///
/// Every value is finite and strictly positive, which is checked once when the
/// parameters are constructed. After that the constants are fixed for the
/// lifetime of the vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "UncheckedParameters")
)]
pub struct Parameters {
    b: f64,
    d: f64,
    m: f64,
    l: f64,
    ix: f64,
    iy: f64,
    iz: f64,
    jr: f64,
}

impl Parameters {
    /// Create a new set of parameters.
    ///
    /// * `b` thrust coefficient (N s^2)
    /// * `d` drag coefficient (N m s^2)
    /// * `m` mass (kg)
    /// * `l` arm length (m)
    /// * `ix`, `iy`, `iz` principal moments of inertia (kg m^2)
    /// * `jr` rotor moment of inertia (kg m^2)
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        b: f64,
        d: f64,
        m: f64,
        l: f64,
        ix: f64,
        iy: f64,
        iz: f64,
        jr: f64,
    ) -> Result<Self> {
        let params = Self {
            b,
            d,
            m,
            l,
            ix,
            iy,
            iz,
            jr,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    /// Estimated constants for a 3DR Iris class quadrotor.
    pub fn iris() -> Self {
        Self {
            b: 5.30216718361085e-5,
            d: 2.23656692806239e-6,
            m: 16.47,
            l: 0.6,
            ix: 2.,
            iy: 2.,
            iz: 3.,
            jr: 3.08013e-4,
        }
    }

    /// Check that every constant is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.named() {
            if !value.is_finite() || value <= 0. {
                return Err(Error::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    fn named(&self) -> [(&'static str, f64); 8] {
        [
            ("b", self.b),
            ("d", self.d),
            ("m", self.m),
            ("l", self.l),
            ("ix", self.ix),
            ("iy", self.iy),
            ("iz", self.iz),
            ("jr", self.jr),
        ]
    }

    /// Thrust coefficient.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Drag coefficient.
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Mass.
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Arm length.
    pub fn l(&self) -> f64 {
        self.l
    }

    pub fn ix(&self) -> f64 {
        self.ix
    }

    pub fn iy(&self) -> f64 {
        self.iy
    }

    pub fn iz(&self) -> f64 {
        self.iz
    }

    /// Rotor moment of inertia.
    pub fn jr(&self) -> f64 {
        self.jr
    }
}

/// Deserialized constants before they are checked by [`Parameters::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedParameters {
    b: f64,
    d: f64,
    m: f64,
    l: f64,
    ix: f64,
    iy: f64,
    iz: f64,
    jr: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedParameters> for Parameters {
    type Error = Error;

    fn try_from(raw: UncheckedParameters) -> Result<Self> {
        Parameters::new(raw.b, raw.d, raw.m, raw.l, raw.ix, raw.iy, raw.iz, raw.jr)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParametersBuilder {
    b: Option<f64>,
    d: Option<f64>,
    m: Option<f64>,
    l: Option<f64>,
    ix: Option<f64>,
    iy: Option<f64>,
    iz: Option<f64>,
    jr: Option<f64>,
}

impl ParametersBuilder {
    pub fn b(mut self, b: f64) -> Self {
        self.b = Some(b);
        self
    }

    pub fn d(mut self, d: f64) -> Self {
        self.d = Some(d);
        self
    }

    pub fn m(mut self, m: f64) -> Self {
        self.m = Some(m);
        self
    }

    pub fn l(mut self, l: f64) -> Self {
        self.l = Some(l);
        self
    }

    /// Set all three principal moments of inertia at once.
    pub fn inertia(mut self, ix: f64, iy: f64, iz: f64) -> Self {
        self.ix = Some(ix);
        self.iy = Some(iy);
        self.iz = Some(iz);
        self
    }

    pub fn ix(mut self, ix: f64) -> Self {
        self.ix = Some(ix);
        self
    }

    pub fn iy(mut self, iy: f64) -> Self {
        self.iy = Some(iy);
        self
    }

    pub fn iz(mut self, iz: f64) -> Self {
        self.iz = Some(iz);
        self
    }

    pub fn jr(mut self, jr: f64) -> Self {
        self.jr = Some(jr);
        self
    }

    pub fn build(self) -> Result<Parameters> {
        Parameters::new(
            required("b", self.b)?,
            required("d", self.d)?,
            required("m", self.m)?,
            required("l", self.l)?,
            required("ix", self.ix)?,
            required("iy", self.iy)?,
            required("iz", self.iz)?,
            required("jr", self.jr)?,
        )
    }
}

fn required(name: &'static str, value: Option<f64>) -> Result<f64> {
    value.ok_or(Error::MissingParameter(name))
}
