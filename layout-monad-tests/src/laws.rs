use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use layout_monad::{LayoutDict, LayoutMonad};
use proptest::prelude::*;
use proptest::sample::select;

use crate::breakpoint::{arb_breakpoint, arb_dict, arb_layouts, Breakpoint};
use crate::init_logging;

type Counts = Rc<RefCell<HashMap<Breakpoint, usize>>>;

/// A monad over `dict` that records how often each layout's thunk runs.
fn counted(dict: &[(Breakpoint, i32)]) -> (LayoutMonad<Breakpoint, i32>, Counts) {
    let counts = Counts::default();
    let values: HashMap<_, _> = dict.iter().copied().collect();
    let recorder = Rc::clone(&counts);
    let monad = LayoutMonad::from_layouts(dict.iter().map(|(l, _)| *l), move |l| {
        *recorder.borrow_mut().entry(*l).or_default() += 1;
        values[l]
    });
    (monad, counts)
}

fn count(counts: &Counts, layout: Breakpoint) -> usize {
    counts.borrow().get(&layout).copied().unwrap_or(0)
}

fn arb_fn() -> impl Strategy<Value = fn(i32) -> i32> {
    select(vec![
        (|x: i32| x.wrapping_mul(10)) as fn(i32) -> i32,
        (|x: i32| x / 2) as fn(i32) -> i32,
        (|x: i32| x.wrapping_neg()) as fn(i32) -> i32,
        (|x: i32| x.wrapping_add(1)) as fn(i32) -> i32,
    ])
}

fn expected<L: Clone, T, U>(dict: &[(L, T)], f: impl Fn(&L, &T) -> U) -> LayoutDict<L, U> {
    dict.iter().map(|(l, v)| (l.clone(), f(l, v))).collect()
}

proptest! {
    #[test]
    fn map_identity(dict in arb_dict()) {
        let monad = LayoutMonad::from_dict(dict.clone());
        prop_assert_eq!(monad.map(|x| x).get_dict(), monad.get_dict());
        prop_assert_eq!(monad.get_dict(), Ok(dict.into_iter().collect::<LayoutDict<_, _>>()));
    }

    #[test]
    fn map_composition(dict in arb_dict(), f in arb_fn(), g in arb_fn()) {
        let monad = LayoutMonad::from_dict(dict);
        prop_assert_eq!(
            monad.map(f).map(g).get_dict(),
            monad.map(move |x| g(f(x))).get_dict()
        );
    }

    #[test]
    fn apply_pointwise(layouts in arb_layouts(), a in any::<i32>(), f in arb_fn()) {
        let funcs = LayoutMonad::of(layouts.clone(), f);
        let applied = LayoutMonad::of(layouts.clone(), a).apply(&funcs);
        for layout in &layouts {
            prop_assert_eq!(applied.get_value(layout), Ok(f(a)));
        }
    }

    #[test]
    fn apply_distinct_functions(dict in arb_dict(), fs in prop::collection::vec(arb_fn(), 4)) {
        let funcs = LayoutMonad::from_layouts(Breakpoint::ALL, move |l| fs[*l as usize]);
        let applied = LayoutMonad::from_dict(dict.clone()).apply(&funcs);
        let funcs_dict = funcs.get_dict().unwrap();
        prop_assert_eq!(
            applied.get_dict(),
            Ok(expected(&dict, |l, v| funcs_dict.get(l).unwrap()(*v)))
        );
    }

    #[test]
    fn chain_left_identity(layouts in arb_layouts(), a in any::<i32>()) {
        let cont = {
            let layouts = layouts.clone();
            move |x: i32| {
                LayoutMonad::from_layouts(layouts.clone(), move |l| x.wrapping_add(*l as i32))
            }
        };
        prop_assert_eq!(
            LayoutMonad::of(layouts.clone(), a).chain(cont.clone()).get_dict(),
            cont(a).get_dict()
        );
    }

    #[test]
    fn chain_right_identity(dict in arb_dict()) {
        let monad = LayoutMonad::from_dict(dict.clone());
        let layouts: Vec<_> = dict.iter().map(|(l, _)| *l).collect();
        prop_assert_eq!(
            monad.chain(move |x| LayoutMonad::of(layouts.clone(), x)).get_dict(),
            monad.get_dict()
        );
    }

    #[test]
    fn chain_reads_same_layout(dict in arb_dict()) {
        let monad = LayoutMonad::from_dict(dict.clone());
        let chained = monad.chain(|v| LayoutMonad::from_layouts(Breakpoint::ALL, move |l| (v, *l)));
        prop_assert_eq!(chained.get_dict(), Ok(expected(&dict, |l, v| (*v, *l))));
    }

    #[test]
    fn get_value_runs_each_thunk_once(
        dict in arb_dict(),
        requests in prop::collection::vec(arb_breakpoint(), 0..12),
    ) {
        init_logging();
        let (monad, counts) = counted(&dict);
        prop_assert!(counts.borrow().is_empty());

        for layout in &requests {
            let value = monad.get_value(layout);
            match dict.iter().find(|(l, _)| l == layout) {
                Some((_, v)) => prop_assert_eq!(value, Ok(*v)),
                None => prop_assert!(value.is_err()),
            }
        }

        for (layout, _) in &dict {
            let requested = requests.contains(layout);
            prop_assert_eq!(count(&counts, *layout), usize::from(requested));
            prop_assert_eq!(monad.is_resolved(layout), Ok(requested));
        }
    }

    #[test]
    fn derived_monads_defer_to_source(
        dict in arb_dict(),
        requests in prop::collection::vec(arb_breakpoint(), 0..12),
    ) {
        let (source, counts) = counted(&dict);
        let derived = source.map(|x| x.wrapping_mul(3)).map(|x| x.wrapping_sub(1));
        let chained = derived.chain(|x| LayoutMonad::of(Breakpoint::ALL, x));
        prop_assert!(counts.borrow().is_empty());

        for layout in &requests {
            let _ = chained.get_value(layout);
            let _ = derived.get_value(layout);
        }
        for (layout, _) in &dict {
            prop_assert_eq!(count(&counts, *layout), usize::from(requests.contains(layout)));
        }
    }

    #[test]
    fn or_short_circuits(
        layouts in arb_layouts(),
        primary in prop::collection::vec(any::<Option<i32>>(), 4),
    ) {
        let primary: Vec<_> = layouts.iter().copied().zip(primary).collect();
        let fallback_dict: Vec<_> = layouts.iter().map(|l| (*l, -(*l as i32))).collect();
        let (fallback, counts) = counted(&fallback_dict);

        let merged = LayoutMonad::from_dict(primary.clone())
            .or(&fallback.map(Some))
            .get_dict()
            .unwrap();

        for (layout, value) in &primary {
            let used_fallback = value.is_none();
            prop_assert_eq!(count(&counts, *layout), usize::from(used_fallback));
            let want = if used_fallback { Some(-(*layout as i32)) } else { *value };
            prop_assert_eq!(merged.get(layout), Some(&want));
        }
    }
}
