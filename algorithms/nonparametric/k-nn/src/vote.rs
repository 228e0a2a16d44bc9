/// Picks the most frequent label.
///
/// Labels are tallied in the order they are first seen, and a count has to
/// beat the current best strictly to take over. With neighbors sorted
/// nearest-first, a tie therefore goes to the label of the nearest tied
/// neighbor. Returns `None` for an empty input.
pub(crate) fn majority<'a, I>(labels: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    // k is small, a linear scan keeps first-seen order without a map.
    let mut tally: Vec<(&'a str, usize)> = Vec::new();
    for label in labels {
        match tally.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (label, count) in tally {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label)
}
