//! Nayin (纳音) sound-element labels.
//!
//! The 60-cycle is split into 30 consecutive pairs; each pair shares one
//! label. Lookup is a direct table index, no computation beyond
//! [`Pillar::cycle_index`].

use serde::Serialize;

use crate::element::Element;
use crate::pillar::Pillar;

/// A nayin label and the element it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Nayin {
    pub name: &'static str,
    pub english: &'static str,
    pub element: Element,
}

const fn n(name: &'static str, english: &'static str, element: Element) -> Nayin {
    Nayin {
        name,
        english,
        element,
    }
}

/// 30 labels, index = cycle_index / 2.
pub const NAYIN_TABLE: [Nayin; 30] = [
    n("海中金", "Gold in the Sea", Element::Metal),
    n("炉中火", "Fire in the Furnace", Element::Fire),
    n("大林木", "Wood of the Great Forest", Element::Wood),
    n("路旁土", "Earth by the Roadside", Element::Earth),
    n("剑锋金", "Metal of the Sword Edge", Element::Metal),
    n("山头火", "Fire on the Mountain Top", Element::Fire),
    n("涧下水", "Water in the Ravine", Element::Water),
    n("城头土", "Earth on the City Wall", Element::Earth),
    n("白蜡金", "White Wax Metal", Element::Metal),
    n("杨柳木", "Willow Wood", Element::Wood),
    n("泉中水", "Water in the Spring", Element::Water),
    n("屋上土", "Earth on the Roof", Element::Earth),
    n("霹雳火", "Thunderbolt Fire", Element::Fire),
    n("松柏木", "Pine and Cypress Wood", Element::Wood),
    n("长流水", "Long-flowing Water", Element::Water),
    n("沙中金", "Gold in the Sand", Element::Metal),
    n("山下火", "Fire at the Mountain Foot", Element::Fire),
    n("平地木", "Wood of the Plains", Element::Wood),
    n("壁上土", "Earth on the Wall", Element::Earth),
    n("金箔金", "Gold Leaf Metal", Element::Metal),
    n("覆灯火", "Lamp Fire", Element::Fire),
    n("天河水", "Water of the Heavenly River", Element::Water),
    n("大驿土", "Earth of the Great Post Road", Element::Earth),
    n("钗钏金", "Hairpin Metal", Element::Metal),
    n("桑柘木", "Mulberry Wood", Element::Wood),
    n("大溪水", "Water of the Great Stream", Element::Water),
    n("沙中土", "Earth in the Sand", Element::Earth),
    n("天上火", "Fire in the Sky", Element::Fire),
    n("石榴木", "Pomegranate Wood", Element::Wood),
    n("大海水", "Water of the Great Sea", Element::Water),
];

/// Nayin label of a pillar.
pub const fn nayin(pillar: Pillar) -> Nayin {
    NAYIN_TABLE[(pillar.cycle_index() / 2) as usize]
}
