/// Owl mascot whose pupils follow the pointer

use yew::prelude::*;

/// Furthest a pupil moves from its resting spot, in px
const MAX_PUPIL_SHIFT: f64 = 5.0;
/// Pointer distance per px of pupil movement
const PUPIL_DAMPING: f64 = 25.0;

/// Pupil translation for a pointer at `pointer` and an owl centred on `center`
pub fn pupil_offset(center: (f64, f64), pointer: (f64, f64)) -> (f64, f64) {
    let dx = pointer.0 - center.0;
    let dy = pointer.1 - center.1;

    let angle = dy.atan2(dx);
    let distance = (dx.hypot(dy) / PUPIL_DAMPING).min(MAX_PUPIL_SHIFT);

    (angle.cos() * distance, angle.sin() * distance)
}

#[derive(Properties, PartialEq)]
pub struct OwlProps {
    pub node_ref: NodeRef,
    pub pupils: (f64, f64),
}

#[function_component(Owl)]
pub fn owl(props: &OwlProps) -> Html {
    let (x, y) = props.pupils;
    let pupil_style = format!("transform: translate({x:.2}px, {y:.2}px)");

    html! {
        <div class="owl-container" ref={props.node_ref.clone()}>
            <svg width="56" height="56" viewBox="0 0 64 64">
                <ellipse cx="32" cy="36" rx="26" ry="24" fill="#8B5E3C" />
                <circle cx="21" cy="28" r="10" fill="white" />
                <circle cx="43" cy="28" r="10" fill="white" />
                <circle id="leftPupil" cx="21" cy="28" r="4" fill="#222" style={pupil_style.clone()} />
                <circle id="rightPupil" cx="43" cy="28" r="4" fill="#222" style={pupil_style} />
                <polygon points="29,36 35,36 32,42" fill="#F2A93B" />
            </svg>
        </div>
    }
}
