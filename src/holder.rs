use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::{self, ManuallyDrop, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr;

use crate::errors::{bad_access_panic, BadAccess};

/// A container for zero or one value of type `T`.
///
/// The `Holder` keeps its value inline, in storage of exactly the size and
/// alignment of `T`, together with a flag recording whether a live value
/// occupies that storage. Values are written, assigned over and dropped in
/// place; the holder itself never allocates.
///
/// Mutation follows one rule throughout: an empty holder constructs the new
/// value in its storage, and a present holder assigns over the live value.
///
/// ```
/// use holder::Holder;
///
/// let mut h = Holder::<i32>::new();
/// assert!(!h.has_value());
///
/// h.assign(5);
/// assert_eq!(*h, 5);
///
/// let h2 = h.clone();
/// h.emplace(9);
/// assert_eq!(*h, 9);
/// assert_eq!(*h2, 5);
///
/// h.reset();
/// assert!(!h.has_value());
/// ```
pub struct Holder<T> {
    // initialized if and only if `present`
    storage: MaybeUninit<T>,
    present: bool,
}

impl<T> Drop for Holder<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> Holder<T> {
    /// Create a new empty `Holder`.
    ///
    /// No `T` is constructed.
    ///
    /// ```
    /// use holder::Holder;
    ///
    /// const EMPTY: Holder<String> = Holder::new();
    /// assert!(!EMPTY.has_value());
    /// ```
    #[inline]
    pub const fn new() -> Holder<T> {
        Holder {
            storage: MaybeUninit::uninit(),
            present: false,
        }
    }

    /// Create a `Holder` by moving `value` into its storage.
    #[inline]
    pub const fn with_value(value: T) -> Holder<T> {
        Holder {
            storage: MaybeUninit::new(value),
            present: true,
        }
    }

    /// Create a `Holder` holding a clone of `value`.
    pub fn from_ref(value: &T) -> Holder<T>
        where T: Clone
    {
        Holder::with_value(value.clone())
    }

    /// Create a `Holder` by moving the value out of `other`.
    ///
    /// If `other` is empty, the result is empty. Otherwise `other` keeps
    /// reporting a value: it is left holding `T::default()`, the moved-from
    /// state of its value.
    ///
    /// ```
    /// use holder::Holder;
    ///
    /// let mut donor = Holder::with_value(vec![1, 2, 3]);
    /// let h = Holder::move_from(&mut donor);
    ///
    /// assert_eq!(*h, [1, 2, 3]);
    /// assert!(donor.has_value());
    /// assert!(donor.is_empty());
    /// ```
    pub fn move_from(other: &mut Holder<T>) -> Holder<T>
        where T: Default
    {
        match other.as_option_mut() {
            Some(value) => Holder::with_value(mem::take(value)),
            None => Holder::new(),
        }
    }

    /// Return `true` if a value is held.
    #[inline]
    pub const fn has_value(&self) -> bool {
        self.present
    }

    /// Store `value`, returning the holder for chaining.
    ///
    /// An empty holder moves `value` into its storage. A present holder
    /// assigns `value` over the live one; the storage stays occupied
    /// throughout, and the previous value is dropped by the assignment.
    ///
    /// ```
    /// use holder::Holder;
    ///
    /// let mut h = Holder::<i32>::new();
    /// h.assign(1).assign(2);
    /// assert_eq!(h.value(), Ok(&2));
    /// ```
    pub fn assign(&mut self, value: T) -> &mut Self {
        if self.present {
            unsafe {
                *self.get_unchecked_mut() = value;
            }
        } else {
            unsafe {
                self.init(value);
            }
        }
        self
    }

    /// Store a clone of `value`, returning the holder for chaining.
    ///
    /// A present holder uses `T::clone_from`, so a held value can reuse its
    /// own resources (a `Vec` keeps its allocation).
    pub fn assign_ref(&mut self, value: &T) -> &mut Self
        where T: Clone
    {
        if self.present {
            unsafe {
                self.get_unchecked_mut().clone_from(value);
            }
        } else {
            let value = value.clone();
            unsafe {
                self.init(value);
            }
        }
        self
    }

    /// Copy the state of `rhs` into this holder.
    ///
    /// An empty `rhs` resets this holder. Otherwise its value is cloned in
    /// following the rules of [`assign_ref`](Holder::assign_ref).
    pub fn assign_holder(&mut self, rhs: &Holder<T>) -> &mut Self
        where T: Clone
    {
        match rhs.as_option() {
            Some(value) => self.assign_ref(value),
            None => {
                self.reset();
                self
            }
        }
    }

    /// Move the state of `rhs` into this holder.
    ///
    /// An empty `rhs` resets this holder. Otherwise its value is moved in
    /// following the rules of [`assign`](Holder::assign), and `rhs` is left
    /// present, holding `T::default()`.
    ///
    /// ```
    /// use holder::Holder;
    ///
    /// let mut h = Holder::with_value(String::from("old"));
    /// let mut rhs = Holder::with_value(String::from("new"));
    /// h.move_assign(&mut rhs);
    ///
    /// assert_eq!(h.value().map(|s| s.as_str()), Ok("new"));
    /// assert_eq!(rhs.value().map(|s| s.as_str()), Ok(""));
    ///
    /// let mut empty = Holder::new();
    /// h.move_assign(&mut empty);
    /// assert!(!h.has_value());
    /// ```
    pub fn move_assign(&mut self, rhs: &mut Holder<T>) -> &mut Self
        where T: Default
    {
        match rhs.as_option_mut() {
            Some(value) => {
                let value = mem::take(value);
                self.assign(value)
            }
            None => {
                self.reset();
                self
            }
        }
    }

    /// Drop any held value, then store `value` in its place.
    ///
    /// `value` is built by the caller, so it exists before the old value is
    /// dropped. Use [`emplace_with`](Holder::emplace_with) when the old value
    /// must be gone before the new one is constructed.
    #[inline]
    pub fn emplace(&mut self, value: T) -> &mut T {
        self.emplace_with(move || value)
    }

    /// Drop any held value, then construct a new one in place from `f`.
    ///
    /// The holder is empty while `f` runs; if `f` panics it stays empty.
    ///
    /// ```
    /// use holder::Holder;
    ///
    /// let mut h = Holder::with_value(String::from("a"));
    /// h.emplace_with(|| "b".repeat(3)).push('!');
    /// assert_eq!(h.value().map(|s| s.as_str()), Ok("bbb!"));
    /// ```
    pub fn emplace_with<F>(&mut self, f: F) -> &mut T
        where F: FnOnce() -> T
    {
        self.reset();
        let value = f();
        unsafe {
            self.init(value)
        }
    }

    /// Drop any held value, then construct a new one in place from the
    /// fallible constructor `f`.
    ///
    /// If `f` returns an error, the holder is left empty and the error is
    /// passed through.
    ///
    /// ```
    /// use holder::Holder;
    ///
    /// let mut h = Holder::with_value(1u8);
    /// let res = h.try_emplace_with(|| "300".parse::<u8>());
    /// assert!(res.is_err());
    /// assert!(!h.has_value());
    /// ```
    pub fn try_emplace_with<F, E>(&mut self, f: F) -> Result<&mut T, E>
        where F: FnOnce() -> Result<T, E>
    {
        self.reset();
        let value = f()?;
        unsafe {
            Ok(self.init(value))
        }
    }

    /// Return a reference to the held value, or the value constructed by `f`
    /// if the holder was empty.
    pub fn get_or_insert_with<F>(&mut self, f: F) -> &mut T
        where F: FnOnce() -> T
    {
        if !self.present {
            let value = f();
            unsafe {
                self.init(value);
            }
        }
        unsafe {
            self.get_unchecked_mut()
        }
    }

    /// Drop the held value, if any, leaving the holder empty.
    ///
    /// Calling `reset` on an empty holder does nothing.
    pub fn reset(&mut self) {
        if !self.present {
            return;
        }
        // panic safety: clear the flag first, so a panicking destructor
        // leaks the value instead of dropping it twice.
        self.present = false;
        unsafe {
            ptr::drop_in_place(self.storage.as_mut_ptr());
        }
    }

    /// Move the held value out, leaving the holder empty.
    pub fn take(&mut self) -> Option<T> {
        if !self.present {
            return None;
        }
        self.present = false;
        unsafe {
            Some(ptr::read(self.storage.as_ptr()))
        }
    }

    /// Store `value`, returning the previously held value if there was one.
    pub fn replace(&mut self, value: T) -> Option<T> {
        let old = self.take();
        unsafe {
            self.init(value);
        }
        old
    }

    /// Return a reference to the held value, or `BadAccess` if empty.
    ///
    /// ```
    /// use holder::Holder;
    ///
    /// let h = Holder::<u32>::new();
    /// assert!(h.value().is_err());
    /// assert_eq!(h.value().unwrap_err().to_string(), "bad holder access");
    /// ```
    #[inline]
    pub fn value(&self) -> Result<&T, BadAccess> {
        self.check()?;
        unsafe {
            Ok(self.get_unchecked())
        }
    }

    /// Return a mutable reference to the held value, or `BadAccess` if empty.
    #[inline]
    pub fn value_mut(&mut self) -> Result<&mut T, BadAccess> {
        self.check()?;
        unsafe {
            Ok(self.get_unchecked_mut())
        }
    }

    /// Consume the holder and return the held value, or `BadAccess` if empty.
    #[inline]
    pub fn into_value(self) -> Result<T, BadAccess> {
        self.check()?;
        unsafe {
            Ok(self.into_inner_unchecked())
        }
    }

    /// Return a reference to the held value without checking for presence.
    ///
    /// ## Safety
    ///
    /// The holder must hold a value.
    #[inline]
    pub unsafe fn get_unchecked(&self) -> &T {
        debug_assert!(self.present);
        &*self.storage.as_ptr()
    }

    /// Return a mutable reference to the held value without checking for
    /// presence.
    ///
    /// ## Safety
    ///
    /// The holder must hold a value.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut T {
        debug_assert!(self.present);
        &mut *self.storage.as_mut_ptr()
    }

    /// Consume the holder and return the held value without checking for
    /// presence.
    ///
    /// ## Safety
    ///
    /// The holder must hold a value.
    pub unsafe fn into_inner_unchecked(self) -> T {
        debug_assert!(self.present);
        let this = ManuallyDrop::new(self);
        ptr::read(this.storage.as_ptr())
    }

    #[inline]
    pub fn as_option(&self) -> Option<&T> {
        if self.present {
            unsafe { Some(self.get_unchecked()) }
        } else {
            None
        }
    }

    #[inline]
    pub fn as_option_mut(&mut self) -> Option<&mut T> {
        if self.present {
            unsafe { Some(self.get_unchecked_mut()) }
        } else {
            None
        }
    }

    pub fn into_option(self) -> Option<T> {
        self.into_value().ok()
    }

    // Presence check shared by all checked accessors.
    #[inline]
    fn check(&self) -> Result<(), BadAccess> {
        if self.present {
            Ok(())
        } else {
            Err(BadAccess::new())
        }
    }

    /// Write `value` into the storage and mark the holder present.
    ///
    /// ## Safety
    ///
    /// The holder must be empty.
    #[inline]
    unsafe fn init(&mut self, value: T) -> &mut T {
        debug_assert!(!self.present);
        ptr::write(self.storage.as_mut_ptr(), value);
        self.present = true;
        &mut *self.storage.as_mut_ptr()
    }
}

impl<T> Default for Holder<T> {
    /// Return an empty `Holder`
    fn default() -> Self {
        Holder::new()
    }
}

/// Dereference to the held value.
///
/// ***Panics*** if the holder is empty; use [`Holder::value`] for a
/// fallible access or [`Holder::get_unchecked`] to skip the check.
impl<T> Deref for Holder<T> {
    type Target = T;
    #[inline]
    #[track_caller]
    fn deref(&self) -> &T {
        match self.as_option() {
            Some(value) => value,
            None => bad_access_panic(),
        }
    }
}

impl<T> DerefMut for Holder<T> {
    #[inline]
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match self.as_option_mut() {
            Some(value) => value,
            None => bad_access_panic(),
        }
    }
}

impl<T> Clone for Holder<T>
    where T: Clone
{
    fn clone(&self) -> Self {
        match self.as_option() {
            Some(value) => Holder::from_ref(value),
            None => Holder::new(),
        }
    }

    fn clone_from(&mut self, rhs: &Self) {
        self.assign_holder(rhs);
    }
}

impl<T> From<T> for Holder<T> {
    fn from(value: T) -> Self {
        Holder::with_value(value)
    }
}

impl<T> From<Option<T>> for Holder<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Holder::with_value(value),
            None => Holder::new(),
        }
    }
}

impl<T> From<Holder<T>> for Option<T> {
    fn from(holder: Holder<T>) -> Self {
        holder.into_option()
    }
}

impl<T> fmt::Debug for Holder<T>
    where T: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.as_option() {
            Some(value) => f.debug_tuple("Holder").field(value).finish(),
            None => f.write_str("Holder(<empty>)"),
        }
    }
}

impl<T> PartialEq for Holder<T>
    where T: PartialEq
{
    fn eq(&self, other: &Self) -> bool {
        self.as_option() == other.as_option()
    }
}

impl<T> Eq for Holder<T> where T: Eq {}

/// An empty holder orders before any present one.
impl<T> PartialOrd for Holder<T>
    where T: PartialOrd
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_option().partial_cmp(&other.as_option())
    }
}

impl<T> Ord for Holder<T>
    where T: Ord
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_option().cmp(&other.as_option())
    }
}

impl<T> Hash for Holder<T>
    where T: Hash
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_option().hash(state)
    }
}

#[cfg(feature = "zeroize")]
/// "Best efforts" zeroing of the `Holder`'s value and storage.
///
/// The held value is zeroized and dropped, then the raw storage is zeroed.
///
/// Requires crate feature `"zeroize"`
impl<T: zeroize::Zeroize> zeroize::Zeroize for Holder<T> {
    fn zeroize(&mut self) {
        if let Some(value) = self.as_option_mut() {
            value.zeroize();
        }
        self.reset();
        // Zeroize the backing storage.
        let bytes = unsafe {
            std::slice::from_raw_parts_mut(self.storage.as_mut_ptr() as *mut MaybeUninit<u8>,
                                           mem::size_of::<T>())
        };
        zeroize::Zeroize::zeroize(bytes);
    }
}
