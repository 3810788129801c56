use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Hypnotoad,
    CorbinSpin,
    CloudFormation,
}

/// Relative draw weights. The CloudFormation logo shows up about 7 times in 9.
pub const ICON_WEIGHTS: &[(Icon, u32)] = &[
    (Icon::Hypnotoad, 1),
    (Icon::CorbinSpin, 1),
    (Icon::CloudFormation, 7),
];

impl Icon {
    pub fn emoji(&self) -> &'static str {
        match self {
            Icon::Hypnotoad => ":hypnotoad:",
            Icon::CorbinSpin => ":corbinspin:",
            Icon::CloudFormation => ":cloudformation:",
        }
    }

    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let total: u32 = ICON_WEIGHTS.iter().map(|(_, weight)| weight).sum();
        let mut roll = rng.random_range(0..total);

        for (icon, weight) in ICON_WEIGHTS {
            if roll < *weight {
                return *icon;
            }
            roll -= weight;
        }

        Icon::CloudFormation
    }
}
