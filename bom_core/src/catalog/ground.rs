//! Ground structure catalog. The same rows serve fence and pole structures;
//! the registry formulas make the difference (pole structures get no rods).

use once_cell::sync::Lazy;

use super::{CodeSpec, LengthSpec, MaterialDefinition, QuantitySpec};
use crate::formulas::Formula;

fn row(code: CodeSpec, name: &'static str, length: LengthSpec, quantity: Formula) -> MaterialDefinition {
    MaterialDefinition::new(code, name, length, QuantitySpec::Registry(quantity))
}

pub static GROUND_CATALOG: Lazy<Vec<MaterialDefinition>> = Lazy::new(|| {
    use CodeSpec::{Derived, Literal};
    use LengthSpec::{Fixed, NotApplicable};

    vec![
        row(Derived(Formula::FrontLegCode), "Priekinė koja", LengthSpec::Derived(Formula::FrontLegLength), Formula::LegCount),
        row(Derived(Formula::RearLegCode), "Galinė koja", LengthSpec::Derived(Formula::RearLegLength), Formula::LegCount),
        row(Literal(""), "Strypai", Fixed(1200.0), Formula::RodCount),
        row(Literal("R-1"), "Ryšys", Fixed(3550.0), Formula::ConnectorCount),
        row(Literal("R-2"), "Ryšys", Fixed(1930.0), Formula::ConnectorR2Count),
        row(Derived(Formula::RafterCode), "Gegnė", LengthSpec::Derived(Formula::RafterLength), Formula::LegCount),
        row(Literal("Gb-1"), "Grebėstas", Fixed(4200.0), Formula::BattenCount),
        row(Literal("Gb-1*"), "Grebėstas", LengthSpec::Derived(Formula::ExtraBattenLength), Formula::ExtraBattenCount),
        row(Literal("Gbj"), "Grebėstų jungtys", Fixed(200.0), Formula::BattenJointCount),
        row(Literal(""), "Varžto M10 kompl. (1sud.)", NotApplicable, Formula::M10BoltSetsFirst),
        row(Literal(""), "Varžto M10 kompl. (2sud.)", NotApplicable, Formula::M10BoltSetsSecond),
        row(Literal(""), "Varžto M12 kompl.", NotApplicable, Formula::M12BoltSets),
        row(Literal("Clamp G"), "Galinių prispaudėjų kompl.", NotApplicable, Formula::EndClampCount),
        row(Literal("Clamp V"), "Vidinių prispaudėjų kompl.", NotApplicable, Formula::InnerClampCount),
    ]
});
